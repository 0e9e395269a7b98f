//! Labeled one-dimensional columns.
//!
//! A [`Series`] pairs a type-erased column with an [`Index`] and an optional
//! name. Operations that change rows (`head`, `filter`, `append`) never
//! mutate: they slice, take or concatenate the column into a new one.

use std::ops::Not;
use std::sync::Arc;

use occ_core::codec::OccCodec;
use occ_core::traits::ColumnArray;

use crate::accessor::OccAccessor;
use crate::config::FrameConfig;
use crate::error::FrameError;
use crate::index::Index;
use crate::registry;
use occ_core::error::TypeError;

/// Labeled column.
#[derive(Clone, Debug)]
pub struct Series {
    index: Index,
    name: Option<String>,
    values: Arc<dyn ColumnArray>,
}

impl Series {
    /// Creates a series, defaulting to a positional index.
    ///
    /// # Errors
    /// `FrameError::LengthMismatch` if `index` and `values` differ in length.
    pub fn new(
        values: Arc<dyn ColumnArray>,
        index: Option<Index>,
        name: Option<String>,
    ) -> Result<Self, FrameError> {
        let index = index.unwrap_or_else(|| Index::range(values.len()));
        if index.len() != values.len() {
            return Err(FrameError::LengthMismatch {
                index: index.len(),
                column: values.len(),
            });
        }
        Ok(Self {
            index,
            name,
            values,
        })
    }

    /// Builds a column of registered type `dtype` from raw strings with the
    /// default codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use occ_frame::registry;
    /// use occ_frame::series::Series;
    ///
    /// registry::register_builtin_types();
    /// let series = Series::from_strings("occ", ["AAPL  200625C00125000"]).unwrap();
    /// assert_eq!(series.dtype(), "occ");
    /// assert!(Series::from_strings("nope", ["x"]).is_err());
    /// ```
    pub fn from_strings<I, S>(dtype: &str, values: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(dtype, values, OccCodec::new())
    }

    /// Builds a column of registered type `dtype` using the codec from
    /// `config`.
    ///
    /// # Errors
    /// `FrameError::Config` if the configured pivot is invalid, otherwise as
    /// [`Series::from_strings`].
    ///
    /// # Examples
    ///
    /// ```
    /// use occ_frame::{registry, FrameConfig, Series};
    ///
    /// registry::register_builtin_types();
    /// let config = FrameConfig::from_toml_str("century_pivot = 80").unwrap();
    /// let series = Series::from_strings_with(&config, "occ", ["IBM   750101C00001000"]).unwrap();
    /// assert_eq!(series.element_at(0).unwrap().as_deref(), Some("IBM   750101C00001000"));
    /// ```
    pub fn from_strings_with<I, S>(
        config: &FrameConfig,
        dtype: &str,
        values: I,
    ) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(dtype, values, config.codec()?)
    }

    fn build<I, S>(dtype: &str, values: I, codec: OccCodec) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let descriptor = registry::lookup(dtype)?;
        let owned: Vec<S> = values.into_iter().collect();
        let raw: Vec<&str> = owned.iter().map(AsRef::as_ref).collect();
        let column = (descriptor.from_sequence)(&raw, codec)?;
        tracing::debug!(
            dtype,
            len = column.len(),
            century_pivot = codec.century_pivot(),
            "Built series column"
        );
        Self::new(column, None, None)
    }

    /// Sets the series name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the index.
    pub fn with_index(self, index: Index) -> Result<Self, FrameError> {
        Self::new(self.values, Some(index), self.name)
    }

    /// Row labels.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Series name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Underlying column.
    pub fn values(&self) -> &Arc<dyn ColumnArray> {
        &self.values
    }

    /// Registered type name of the column.
    pub fn dtype(&self) -> &'static str {
        self.values.type_name()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bytes used by the column storage.
    pub fn nbytes(&self) -> usize {
        self.values.nbytes()
    }

    /// Boxed scalar at row `i`.
    pub fn element_at(&self, i: usize) -> Result<Option<String>, FrameError> {
        Ok(self.values.element_at(i)?)
    }

    /// Element-wise missing-value mask, labeled like this series.
    pub fn is_null_mask(&self) -> BoolSeries {
        self.labeled(self.values.is_null_mask())
    }

    /// First `n` rows (all rows if `n >= len`).
    pub fn head(&self, n: usize) -> Result<Self, FrameError> {
        let end = n.min(self.len());
        let values = self.values.slice_array(0, end)?;
        let index = self
            .index
            .slice(0, end)
            .unwrap_or_else(|| Index::range(end));
        Self::new(values, Some(index), self.name.clone())
    }

    /// Rows where `mask` is `true`.
    ///
    /// # Errors
    /// `FrameError::LengthMismatch` if the mask length differs from the series.
    pub fn filter(&self, mask: &BoolSeries) -> Result<Self, FrameError> {
        if mask.len() != self.len() {
            return Err(FrameError::LengthMismatch {
                index: mask.len(),
                column: self.len(),
            });
        }
        let positions: Vec<usize> = mask
            .values()
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        let indices: Vec<i64> = positions.iter().map(|&i| i as i64).collect();

        let values = self.values.take_array(&indices, false, None)?;
        let index = self
            .index
            .take(&positions)
            .unwrap_or_else(|| Index::range(positions.len()));
        Self::new(values, Some(index), self.name.clone())
    }

    /// Rows of `self` followed by rows of `other`.
    ///
    /// # Errors
    /// `TypeError::Mismatch` (via `FrameError::Occ`) if the column types differ.
    pub fn append(&self, other: &Series) -> Result<Self, FrameError> {
        let values = self.values.concat_arrays(std::slice::from_ref(&other.values))?;
        let index = self.index.append(&other.index);
        Self::new(values, Some(index), self.name.clone())
    }

    /// Shallow or deep copy of the column; labels are shared.
    pub fn copy(&self, deep: bool) -> Self {
        Self {
            index: self.index.clone(),
            name: self.name.clone(),
            values: self.values.copy_array(deep),
        }
    }

    /// OCC accessor over this series.
    ///
    /// # Errors
    /// `TypeError::NotOccType` if the column is not `"occ"`.
    pub fn occ(&self) -> Result<OccAccessor<'_>, TypeError> {
        OccAccessor::new(self)
    }

    pub(crate) fn labeled(&self, values: Vec<bool>) -> BoolSeries {
        BoolSeries {
            index: self.index.clone(),
            name: self.name.clone(),
            values,
        }
    }
}

/// Labeled boolean result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolSeries {
    index: Index,
    name: Option<String>,
    values: Vec<bool>,
}

impl BoolSeries {
    /// Row labels.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Series name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The booleans.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at row `i`.
    pub fn get(&self, i: usize) -> Option<bool> {
        self.values.get(i).copied()
    }

    /// Number of `true` values.
    pub fn count_true(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }
}

impl Not for &BoolSeries {
    type Output = BoolSeries;

    fn not(self) -> BoolSeries {
        BoolSeries {
            index: self.index.clone(),
            name: self.name.clone(),
            values: self.values.iter().map(|v| !v).collect(),
        }
    }
}
