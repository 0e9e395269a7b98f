//! The `"occ"` column type.
//!
//! [`OccColumn`] wraps a [`RecordStore`] and exposes it through the host
//! contract ([`ColumnArray`]) and the domain queries ([`OccColumnOps`]).
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use occ_core::column::OccColumn;
//! use occ_core::traits::OccColumnOps;
//!
//! let column = OccColumn::from_sequence([
//!     "AAPL  200625C00125000",
//!     "SPY   240119P00472500",
//! ])
//! .unwrap();
//!
//! assert_eq!(column.is_call(), vec![true, false]);
//! let as_of = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! assert_eq!(column.is_expired(as_of), vec![true, false]);
//! ```

use std::any::Any;
use std::fmt;
use std::ops::RangeBounds;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::codec::OccCodec;
use crate::error::{IndexError, OccError, TypeError};
use crate::store::RecordStore;
use crate::traits::{ColumnArray, OccColumnOps};
use crate::types::OccSymbol;

/// Type name under which the OCC column is registered.
pub const OCC_TYPE_NAME: &str = "occ";

/// Column of OCC option symbols.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct OccColumn {
    store: RecordStore,
}

impl OccColumn {
    /// Wraps an existing store.
    pub fn from_store(store: RecordStore) -> Self {
        Self { store }
    }

    /// Decodes raw OCC strings (batch-atomic).
    pub fn from_sequence<I, S>(scalars: I) -> Result<Self, OccError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RecordStore::from_strings(scalars).map(Self::from_store)
    }

    /// Decodes raw OCC strings with a specific codec.
    pub fn from_sequence_with<I, S>(codec: OccCodec, scalars: I) -> Result<Self, OccError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RecordStore::from_strings_with(codec, scalars).map(Self::from_store)
    }

    /// Rebuilds a column from factorized unique values.
    ///
    /// Decodes `values` exactly as [`OccColumn::from_sequence`] would, using
    /// the codec of `original`.
    pub fn from_factorized<I, S>(values: I, original: &OccColumn) -> Result<Self, OccError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_sequence_with(original.store.codec(), values)
    }

    /// Returns the underlying store.
    #[inline]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the column is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bytes used by the element storage.
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.store.nbytes()
    }

    /// Canonical OCC string of element `i`.
    pub fn element_at(&self, i: usize) -> Result<String, OccError> {
        self.store.get(i)
    }

    /// Element `i` as a boxed [`OccSymbol`].
    pub fn scalar_at(&self, i: usize) -> Result<OccSymbol, OccError> {
        let record = self.store.record(i).copied().ok_or(IndexError::OutOfBounds {
            index: i as i64,
            len: self.len(),
        })?;
        Ok(OccSymbol::from_record(record, &self.store.codec())?)
    }

    /// Sub-column over `range`, sharing storage.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Self, OccError> {
        self.store.slice(range).map(Self::from_store)
    }

    /// Element-wise null-sentinel test.
    pub fn is_null_mask(&self) -> Vec<bool> {
        self.store.is_null_mask()
    }

    /// Shallow copy shares storage; deep copy duplicates it.
    pub fn copy(&self, deep: bool) -> Self {
        Self::from_store(self.store.copy(deep))
    }

    /// Concatenates columns in order.
    ///
    /// # Errors
    /// See [`RecordStore::concat`]: a later column decoded with another codec
    /// must fit the first column's year window.
    pub fn concat(columns: &[OccColumn]) -> Result<Self, OccError> {
        let stores: Vec<RecordStore> = columns.iter().map(|c| c.store.clone()).collect();
        RecordStore::concat(&stores).map(Self::from_store)
    }

    /// Gathers by position.
    ///
    /// `fill_value` is an OCC string decoded with this column's codec; a
    /// missing fill means the null sentinel.
    pub fn take(
        &self,
        indices: &[i64],
        allow_fill: bool,
        fill_value: Option<&str>,
    ) -> Result<Self, OccError> {
        let fill = fill_value
            .map(|s| self.store.codec().decode(s))
            .transpose()?;
        self.store
            .take(indices, allow_fill, fill)
            .map(Self::from_store)
    }

    /// Encodes every element.
    pub fn values(&self) -> Result<Vec<String>, OccError> {
        self.store.to_strings()
    }
}

impl OccColumnOps for OccColumn {
    fn is_call(&self) -> Vec<bool> {
        self.store.is_call_mask()
    }

    fn is_put(&self) -> Vec<bool> {
        self.store.is_put_mask()
    }

    fn is_expired(&self, as_of: NaiveDate) -> Vec<bool> {
        self.store.is_expired_mask(as_of)
    }
}

impl ColumnArray for OccColumn {
    fn type_name(&self) -> &'static str {
        OCC_TYPE_NAME
    }

    fn len(&self) -> usize {
        OccColumn::len(self)
    }

    fn nbytes(&self) -> usize {
        OccColumn::nbytes(self)
    }

    fn element_at(&self, i: usize) -> Result<Option<String>, OccError> {
        OccColumn::element_at(self, i).map(Some)
    }

    fn slice_array(&self, start: usize, end: usize) -> Result<Arc<dyn ColumnArray>, OccError> {
        Ok(Arc::new(self.slice(start..end)?))
    }

    fn is_null_mask(&self) -> Vec<bool> {
        OccColumn::is_null_mask(self)
    }

    fn copy_array(&self, deep: bool) -> Arc<dyn ColumnArray> {
        Arc::new(self.copy(deep))
    }

    fn concat_arrays(
        &self,
        others: &[Arc<dyn ColumnArray>],
    ) -> Result<Arc<dyn ColumnArray>, OccError> {
        let mut columns = Vec::with_capacity(others.len() + 1);
        columns.push(self.clone());
        for other in others {
            let column = other.as_any().downcast_ref::<OccColumn>().ok_or_else(|| {
                TypeError::Mismatch {
                    expected: OCC_TYPE_NAME.to_string(),
                    found: other.type_name().to_string(),
                }
            })?;
            columns.push(column.clone());
        }
        Ok(Arc::new(OccColumn::concat(&columns)?))
    }

    fn take_array(
        &self,
        indices: &[i64],
        allow_fill: bool,
        fill_value: Option<&str>,
    ) -> Result<Arc<dyn ColumnArray>, OccError> {
        Ok(Arc::new(self.take(indices, allow_fill, fill_value)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for OccColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codec = self.store.codec();
        f.write_str("OccColumn([")?;
        for (i, record) in self.store.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match codec.encode(record) {
                Ok(s) => write!(f, "{:?}", s)?,
                Err(_) => write!(f, "{:?}", record)?,
            }
        }
        f.write_str("])")
    }
}
