//! Process-wide column-type registry.
//!
//! Column types are registered explicitly at process start with
//! [`register_builtin_types`] (idempotent) or [`register`] (fails on a
//! duplicate name). A host then constructs columns by type name.
//!
//! # Examples
//!
//! ```
//! use occ_core::codec::OccCodec;
//! use occ_core::traits::ColumnArray;
//! use occ_frame::registry;
//!
//! registry::register_builtin_types();
//! let occ = registry::lookup("occ").unwrap();
//! let column = (occ.from_sequence)(&["AAPL  200625C00125000"], OccCodec::new()).unwrap();
//! assert_eq!(column.type_name(), "occ");
//! assert!(registry::lookup("decimal").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Once, OnceLock, PoisonError, RwLock};

use occ_core::codec::OccCodec;
use occ_core::column::{OccColumn, OCC_TYPE_NAME};
use occ_core::error::{OccError, TypeError};
use occ_core::traits::ColumnArray;

use crate::error::RegistryError;
use crate::string_column::{StringColumn, STRING_TYPE_NAME};

/// Factory building a column from raw scalar strings.
///
/// The codec carries the host's configured century pivot; column types
/// without dates ignore it.
pub type FromSequenceFn = fn(&[&str], OccCodec) -> Result<Arc<dyn ColumnArray>, OccError>;

/// Factory rebuilding a column from factorized values and the original column.
pub type FromFactorizedFn =
    fn(&[&str], &dyn ColumnArray) -> Result<Arc<dyn ColumnArray>, OccError>;

/// Column type as seen by the host.
#[derive(Clone, Copy)]
pub struct ColumnTypeDescriptor {
    /// Registered type name
    pub name: &'static str,
    /// Storage kind code (`'O'` for object-like scalars)
    pub kind: char,
    /// Name of the boxed scalar returned for single elements
    pub scalar_type: &'static str,
    /// Construct from raw values
    pub from_sequence: FromSequenceFn,
    /// Construct from a factorized pair
    pub from_factorized: FromFactorizedFn,
}

impl ColumnTypeDescriptor {
    /// Returns this descriptor if `name` matches it, `TypeError` otherwise.
    pub fn construct_from_string(&self, name: &str) -> Result<Self, TypeError> {
        if name == self.name {
            Ok(*self)
        } else {
            Err(TypeError::UnknownType {
                expected: self.name.to_string(),
                requested: name.to_string(),
            })
        }
    }
}

impl fmt::Debug for ColumnTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnTypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("scalar_type", &self.scalar_type)
            .finish_non_exhaustive()
    }
}

/// Descriptor of the `"occ"` column type.
pub fn occ_descriptor() -> ColumnTypeDescriptor {
    ColumnTypeDescriptor {
        name: OCC_TYPE_NAME,
        kind: 'O',
        scalar_type: "OccSymbol",
        from_sequence: occ_from_sequence,
        from_factorized: occ_from_factorized,
    }
}

/// Descriptor of the plain `"string"` column type.
pub fn string_descriptor() -> ColumnTypeDescriptor {
    ColumnTypeDescriptor {
        name: STRING_TYPE_NAME,
        kind: 'O',
        scalar_type: "String",
        from_sequence: string_from_sequence,
        from_factorized: string_from_factorized,
    }
}

fn occ_from_sequence(values: &[&str], codec: OccCodec) -> Result<Arc<dyn ColumnArray>, OccError> {
    let column: Arc<dyn ColumnArray> = Arc::new(OccColumn::from_sequence_with(codec, values)?);
    Ok(column)
}

fn occ_from_factorized(
    values: &[&str],
    original: &dyn ColumnArray,
) -> Result<Arc<dyn ColumnArray>, OccError> {
    let original = original
        .as_any()
        .downcast_ref::<OccColumn>()
        .ok_or_else(|| TypeError::Mismatch {
            expected: OCC_TYPE_NAME.to_string(),
            found: original.type_name().to_string(),
        })?;
    let column: Arc<dyn ColumnArray> = Arc::new(OccColumn::from_factorized(values, original)?);
    Ok(column)
}

fn string_from_sequence(values: &[&str], _codec: OccCodec) -> Result<Arc<dyn ColumnArray>, OccError> {
    let column: Arc<dyn ColumnArray> =
        Arc::new(StringColumn::from_sequence(values.iter().copied()));
    Ok(column)
}

fn string_from_factorized(
    values: &[&str],
    _original: &dyn ColumnArray,
) -> Result<Arc<dyn ColumnArray>, OccError> {
    string_from_sequence(values, OccCodec::new())
}

type Table = RwLock<HashMap<&'static str, ColumnTypeDescriptor>>;

static REGISTRY: OnceLock<Table> = OnceLock::new();
static BUILTINS: Once = Once::new();

fn table() -> &'static Table {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers a column type.
///
/// # Errors
/// `RegistryError::AlreadyRegistered` if the name is taken.
pub fn register(descriptor: ColumnTypeDescriptor) -> Result<(), RegistryError> {
    let mut table = table().write().unwrap_or_else(PoisonError::into_inner);
    if table.contains_key(descriptor.name) {
        return Err(RegistryError::AlreadyRegistered {
            name: descriptor.name.to_string(),
        });
    }
    tracing::info!(name = descriptor.name, kind = %descriptor.kind, "Registered column type");
    table.insert(descriptor.name, descriptor);
    Ok(())
}

/// Registers the `"occ"` and `"string"` types exactly once per process.
pub fn register_builtin_types() {
    BUILTINS.call_once(|| {
        for descriptor in [occ_descriptor(), string_descriptor()] {
            if let Err(e) = register(descriptor) {
                tracing::warn!(error = %e, "Builtin column type pre-registered");
            }
        }
    });
}

/// Looks up a registered column type by name.
///
/// # Errors
/// `TypeError::UnknownType` if no type is registered under `name`.
pub fn lookup(name: &str) -> Result<ColumnTypeDescriptor, TypeError> {
    table()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .copied()
        .ok_or_else(|| TypeError::UnknownType {
            expected: "column type".to_string(),
            requested: name.to_string(),
        })
}

/// Registered type names, sorted.
pub fn registered_types() -> Vec<&'static str> {
    let mut names: Vec<_> = table()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .copied()
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered_once() {
        register_builtin_types();
        register_builtin_types();
        let names = registered_types();
        assert!(names.contains(&"occ"));
        assert!(names.contains(&"string"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        register_builtin_types();
        assert_eq!(
            register(occ_descriptor()),
            Err(RegistryError::AlreadyRegistered {
                name: "occ".to_string()
            })
        );
    }

    #[test]
    fn test_lookup_unknown() {
        register_builtin_types();
        assert_eq!(
            lookup("float128").unwrap_err(),
            TypeError::UnknownType {
                expected: "column type".to_string(),
                requested: "float128".to_string(),
            }
        );
    }

    #[test]
    fn test_construct_from_string() {
        let occ = occ_descriptor();
        assert_eq!(occ.construct_from_string("occ").unwrap().name, "occ");
        let err = occ.construct_from_string("int64").unwrap_err();
        assert_eq!(err.to_string(), "Cannot construct a 'occ' from 'int64'");
    }

    #[test]
    fn test_occ_factories() {
        let occ = occ_descriptor();
        assert_eq!(occ.kind, 'O');
        let column = (occ.from_sequence)(&["AAPL  200625C00125000"], OccCodec::new()).unwrap();
        let rebuilt =
            (occ.from_factorized)(&["SPY   240119P00472500"], column.as_ref()).unwrap();
        assert_eq!(
            rebuilt.element_at(0).unwrap().as_deref(),
            Some("SPY   240119P00472500")
        );

        let strings = (string_descriptor().from_sequence)(&["x"], OccCodec::new()).unwrap();
        assert!((occ.from_factorized)(&["SPY   240119P00472500"], strings.as_ref()).is_err());
    }

    #[test]
    fn test_occ_factory_uses_codec() {
        let late = OccCodec::with_century_pivot(80).unwrap();
        let column = (occ_descriptor().from_sequence)(&["IBM   750101C00001000"], late).unwrap();
        let occ = column.as_any().downcast_ref::<OccColumn>().unwrap();
        assert_eq!(occ.store().codec(), late);
        assert_eq!(
            occ.store().record(0).unwrap().expiry(),
            chrono::NaiveDate::from_ymd_opt(2075, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_descriptor_debug() {
        let debug = format!("{:?}", occ_descriptor());
        assert!(debug.contains("\"occ\""));
        assert!(debug.contains("OccSymbol"));
    }
}
