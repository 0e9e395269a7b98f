//! Columnar buffer of decoded OCC records.
//!
//! [`RecordStore`] is a view `(offset, len)` over a reference-counted,
//! immutable buffer of fixed-width [`OccRecord`]s. Slicing and shallow copies
//! share the buffer; deep copies, concatenation and `take` allocate a fresh
//! one. Nothing mutates a buffer after construction.
//!
//! # Examples
//!
//! ```
//! use occ_core::store::RecordStore;
//!
//! let store = RecordStore::from_strings([
//!     "AAPL  200625C00125000",
//!     "SPY   240119P00472500",
//! ])
//! .unwrap();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.get(1).unwrap(), "SPY   240119P00472500");
//! assert_eq!(store.is_put_mask(), vec![false, true]);
//! ```

use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::codec::OccCodec;
use crate::error::{IndexError, OccError};
use crate::types::OccRecord;

/// Index value marking a missing position in [`RecordStore::take`].
pub const MISSING_INDEX: i64 = -1;

/// Ordered, fixed-width store of decoded records.
#[derive(Clone, Debug)]
pub struct RecordStore {
    buffer: Arc<[OccRecord]>,
    offset: usize,
    len: usize,
    codec: OccCodec,
}

impl RecordStore {
    /// Wraps already-decoded records, using the default codec for read-back.
    pub fn from_records(records: Vec<OccRecord>) -> Self {
        let len = records.len();
        Self {
            buffer: Arc::from(records),
            offset: 0,
            len,
            codec: OccCodec::new(),
        }
    }

    /// Creates an empty store.
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Creates a store of `len` null sentinels.
    pub fn null(len: usize) -> Self {
        Self::from_records(vec![OccRecord::NULL; len])
    }

    /// Decodes raw OCC strings with the default codec.
    ///
    /// # Errors
    /// The first malformed element fails the whole batch with
    /// `OccError::Batch` carrying its position.
    pub fn from_strings<I, S>(values: I) -> Result<Self, OccError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_strings_with(OccCodec::new(), values)
    }

    /// Decodes raw OCC strings with the given codec.
    pub fn from_strings_with<I, S>(codec: OccCodec, values: I) -> Result<Self, OccError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(i, s)| codec.decode(s.as_ref()).map_err(|e| OccError::at(i, e)))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::debug!(error = %e, "OCC batch decode rejected"))?;

        tracing::debug!(
            count = records.len(),
            century_pivot = codec.century_pivot(),
            "Decoded OCC batch"
        );
        Ok(Self::from_records(records).with_codec(codec))
    }

    /// Replaces the codec used to encode elements on read.
    pub fn with_codec(mut self, codec: OccCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Returns the codec used to encode elements on read.
    #[inline]
    pub fn codec(&self) -> OccCodec {
        self.codec
    }

    /// Returns the records in this view.
    #[inline]
    pub fn as_slice(&self) -> &[OccRecord] {
        &self.buffer[self.offset..self.offset + self.len]
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, OccRecord> {
        self.as_slice().iter()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the store holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes occupied by the viewed records (`OccRecord::WIDTH * len`).
    #[inline]
    pub fn nbytes(&self) -> usize {
        OccRecord::WIDTH * self.len
    }

    /// Returns the raw record at `i`.
    pub fn record(&self, i: usize) -> Option<&OccRecord> {
        self.as_slice().get(i)
    }

    /// Returns the canonical OCC string of element `i`.
    ///
    /// # Errors
    /// - `IndexError::OutOfBounds` when `i >= len`
    /// - `RangeError::ExpiryOutOfWindow` when the record cannot be encoded
    pub fn get(&self, i: usize) -> Result<String, OccError> {
        let record = self.record(i).ok_or(IndexError::OutOfBounds {
            index: i as i64,
            len: self.len,
        })?;
        Ok(self.codec.encode(record)?)
    }

    /// Encodes every element.
    pub fn to_strings(&self) -> Result<Vec<String>, OccError> {
        self.iter()
            .enumerate()
            .map(|(i, r)| self.codec.encode(r).map_err(|e| OccError::at(i, e)))
            .collect()
    }

    /// Returns a view over `range` sharing this store's buffer.
    ///
    /// # Errors
    /// `IndexError::InvalidSlice` when the range is reversed or exceeds `len`.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Self, OccError> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        if start > end || end > self.len {
            return Err(IndexError::InvalidSlice {
                start,
                end,
                len: self.len,
            }
            .into());
        }

        Ok(Self {
            buffer: Arc::clone(&self.buffer),
            offset: self.offset + start,
            len: end - start,
            codec: self.codec,
        })
    }

    /// Element-wise null-sentinel test.
    pub fn is_null_mask(&self) -> Vec<bool> {
        self.iter().map(OccRecord::is_null).collect()
    }

    /// Element-wise put test.
    pub fn is_put_mask(&self) -> Vec<bool> {
        self.iter().map(OccRecord::is_put).collect()
    }

    /// Element-wise call test.
    pub fn is_call_mask(&self) -> Vec<bool> {
        self.iter().map(OccRecord::is_call).collect()
    }

    /// Element-wise `expiry < as_of`.
    pub fn is_expired_mask(&self, as_of: NaiveDate) -> Vec<bool> {
        self.iter().map(|r| r.is_expired(as_of)).collect()
    }

    /// Copies the store.
    ///
    /// A shallow copy shares the underlying buffer; a deep copy duplicates
    /// the viewed records into a new buffer.
    pub fn copy(&self, deep: bool) -> Self {
        if !deep {
            return self.clone();
        }
        Self {
            buffer: Arc::from(self.as_slice()),
            offset: 0,
            len: self.len,
            codec: self.codec,
        }
    }

    /// Returns `true` if both stores view the same buffer.
    pub fn shares_buffer(&self, other: &RecordStore) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Concatenates stores in order into a new buffer.
    ///
    /// The result reads back with the first store's codec. Records from a
    /// part with a different codec must fall inside that codec's year window.
    ///
    /// # Errors
    /// `OccError::Batch` carrying the position in the result of the first
    /// record that the first store's codec cannot encode.
    pub fn concat(stores: &[RecordStore]) -> Result<Self, OccError> {
        let codec = stores.first().map_or_else(OccCodec::new, RecordStore::codec);
        let total = stores.iter().map(RecordStore::len).sum();
        let mut records = Vec::with_capacity(total);
        for store in stores {
            if store.codec != codec {
                let base = records.len();
                for (i, record) in store.iter().enumerate() {
                    codec
                        .check_window(record)
                        .map_err(|e| OccError::at(base + i, e))?;
                }
            }
            records.extend_from_slice(store.as_slice());
        }

        tracing::trace!(parts = stores.len(), total, "Concatenated record stores");
        Ok(Self::from_records(records).with_codec(codec))
    }

    /// Gathers elements by position.
    ///
    /// `MISSING_INDEX` (-1) marks a missing position: with `allow_fill` it
    /// becomes `fill_value` (the null sentinel when `None`), otherwise the
    /// call fails with `IndexError::MissingIndex`. Any other negative or
    /// out-of-range index fails with `IndexError::OutOfBounds`.
    ///
    /// # Examples
    ///
    /// ```
    /// use occ_core::store::RecordStore;
    ///
    /// let store = RecordStore::from_strings(["AAPL  200625C00125000"]).unwrap();
    /// let taken = store.take(&[0, -1, 0], true, None).unwrap();
    /// assert_eq!(taken.is_null_mask(), vec![false, true, false]);
    /// assert!(store.take(&[-1], false, None).is_err());
    /// ```
    pub fn take(
        &self,
        indices: &[i64],
        allow_fill: bool,
        fill_value: Option<OccRecord>,
    ) -> Result<Self, OccError> {
        let source = self.as_slice();
        let fill = fill_value.unwrap_or(OccRecord::NULL);

        let records = indices
            .iter()
            .enumerate()
            .map(|(position, &index)| {
                if index == MISSING_INDEX {
                    return if allow_fill {
                        Ok(fill)
                    } else {
                        Err(IndexError::MissingIndex { position })
                    };
                }
                usize::try_from(index)
                    .ok()
                    .and_then(|i| source.get(i).copied())
                    .ok_or(IndexError::OutOfBounds {
                        index,
                        len: self.len,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(taken = records.len(), allow_fill, "Took records");
        Ok(Self::from_records(records).with_codec(self.codec))
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for RecordStore {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a OccRecord;
    type IntoIter = std::slice::Iter<'a, OccRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
