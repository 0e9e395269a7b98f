//! Error types for structured error handling.
//!
//! This module provides:
//! - `FormatError`: Malformed OCC input strings
//! - `RangeError`: Values outside what the 21-character layout can encode
//! - `TypeError`: Column type lookups and accessor validation failures
//! - `IndexError`: Out-of-bounds or unresolved positions in element access
//! - `OccError`: Umbrella error returned by store and column operations

use thiserror::Error;

/// Malformed OCC symbol input.
///
/// # Examples
/// ```
/// use occ_core::error::FormatError;
///
/// let err = FormatError::InvalidLength { len: 20 };
/// assert_eq!(format!("{}", err), "OCC symbol must be 21 characters, got 20");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input is not exactly 21 bytes long.
    #[error("OCC symbol must be 21 characters, got {len}")]
    InvalidLength {
        /// Length of the rejected input in bytes
        len: usize,
    },

    /// Input contains non-ASCII characters.
    #[error("OCC symbol must be ASCII: {input:?}")]
    NonAscii {
        /// The rejected input
        input: String,
    },

    /// Date field is not a valid `YYMMDD` calendar date.
    #[error("Invalid expiry date field {field:?}")]
    InvalidDate {
        /// The six-character date field
        field: String,
    },

    /// Strike field is not eight decimal digits.
    #[error("Invalid strike field {field:?}: expected 8 digits")]
    InvalidStrike {
        /// The eight-character strike field
        field: String,
    },
}

/// Value cannot be represented in the fixed-width OCC layout.
///
/// # Examples
/// ```
/// use occ_core::error::RangeError;
///
/// let err = RangeError::SymbolTooLong { symbol: "GOOGLEX".to_string() };
/// assert!(format!("{}", err).contains("GOOGLEX"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Strike in thousandths does not fit in eight digits.
    #[error("Strike {strike} out of range: strike * 1000 must lie in [0, 99999999]")]
    StrikeOutOfRange {
        /// The rejected strike
        strike: f64,
    },

    /// Strike is negative or not a finite number.
    #[error("Strike must be a non-negative finite number, got {strike}")]
    NegativeStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Underlying symbol contains non-ASCII characters.
    #[error("Symbol {symbol:?} must be ASCII")]
    NonAsciiSymbol {
        /// The rejected symbol
        symbol: String,
    },

    /// Underlying symbol exceeds the six-character slot.
    #[error("Symbol {symbol:?} exceeds 6 characters")]
    SymbolTooLong {
        /// The rejected symbol
        symbol: String,
    },

    /// Expiry year falls outside the codec's two-digit-year window.
    #[error("Expiry year {year} outside the two-digit window [{first}, {last}]")]
    ExpiryOutOfWindow {
        /// The rejected year
        year: i32,
        /// First year of the window
        first: i32,
        /// Last year of the window
        last: i32,
    },
}

/// Column type mismatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// No column type is registered under the requested name.
    #[error("Cannot construct a '{expected}' from '{requested}'")]
    UnknownType {
        /// Name of the type doing the construction
        expected: String,
        /// The requested type name
        requested: String,
    },

    /// An OCC-only operation was applied to a column of another type.
    #[error("Can only use .occ accessor with 'occ' values, got '{found}'")]
    NotOccType {
        /// Type name of the offending column
        found: String,
    },

    /// Columns of different types were combined.
    #[error("Expected '{expected}' column, got '{found}'")]
    Mismatch {
        /// Type name required by the operation
        expected: String,
        /// Type name actually supplied
        found: String,
    },
}

/// Position lookup failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Index lies outside `[0, len)`.
    #[error("Index {index} out of bounds for length {len}")]
    OutOfBounds {
        /// The rejected index
        index: i64,
        /// Length of the container
        len: usize,
    },

    /// The missing-value marker `-1` was used without `allow_fill`.
    #[error("Missing index at position {position} but allow_fill is false")]
    MissingIndex {
        /// Position of the marker within the indices
        position: usize,
    },

    /// Slice range does not fit within the container.
    #[error("Slice {start}..{end} invalid for length {len}")]
    InvalidSlice {
        /// Range start
        start: usize,
        /// Range end
        end: usize,
        /// Length of the container
        len: usize,
    },
}

/// Umbrella error for store and column operations.
///
/// # Examples
/// ```
/// use occ_core::error::{FormatError, OccError};
///
/// let err: OccError = FormatError::InvalidLength { len: 3 }.into();
/// assert!(matches!(err, OccError::Format(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OccError {
    /// Malformed input string
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Unencodable value
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Wrong column type
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Bad position
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A bulk operation failed on one element; the whole batch is rejected.
    #[error("Element {index}: {source}")]
    Batch {
        /// Position of the failing element
        index: usize,
        /// The element's error
        #[source]
        source: Box<OccError>,
    },
}

impl OccError {
    /// Wraps an element error with its position in a batch.
    pub fn at(index: usize, source: impl Into<OccError>) -> Self {
        OccError::Batch {
            index,
            source: Box::new(source.into()),
        }
    }

    /// Returns the innermost error, looking through `Batch` wrappers.
    pub fn root(&self) -> &OccError {
        match self {
            OccError::Batch { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::InvalidStrike {
            field: "0012x000".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid strike field \"0012x000\": expected 8 digits"
        );
    }

    #[test]
    fn test_type_error_display() {
        let err = TypeError::UnknownType {
            expected: "occ".to_string(),
            requested: "int64".to_string(),
        };
        assert_eq!(format!("{}", err), "Cannot construct a 'occ' from 'int64'");
    }

    #[test]
    fn test_batch_error_root() {
        let err = OccError::at(4, FormatError::InvalidLength { len: 20 });
        assert_eq!(format!("{}", err), "Element 4: OCC symbol must be 21 characters, got 20");
        assert!(matches!(
            err.root(),
            OccError::Format(FormatError::InvalidLength { len: 20 })
        ));
    }

    #[test]
    fn test_from_conversions() {
        let err: OccError = IndexError::MissingIndex { position: 2 }.into();
        assert!(matches!(err, OccError::Index(_)));

        let err: OccError = RangeError::NegativeStrike { strike: -1.0 }.into();
        assert!(matches!(err, OccError::Range(_)));
    }
}
