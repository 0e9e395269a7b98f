//! Contracts between the OCC column and a columnar host.
//!
//! - [`ColumnArray`]: the type-erased container contract a host framework
//!   stores and manipulates without knowing the element type
//! - [`OccColumnOps`]: the OCC domain queries consumed by accessors

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::OccError;

/// Type-erased column held by a host framework.
///
/// Every method returning a new column hands back a shared, immutable
/// `Arc<dyn ColumnArray>`; hosts never mutate a column in place.
pub trait ColumnArray: fmt::Debug + Send + Sync {
    /// Registered type name of this column (e.g. `"occ"`).
    fn type_name(&self) -> &'static str;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the column has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes used by the element storage.
    fn nbytes(&self) -> usize;

    /// Boxed scalar at `i`, `None` for a missing value the type can express.
    fn element_at(&self, i: usize) -> Result<Option<String>, OccError>;

    /// Contiguous sub-column `[start, end)`.
    fn slice_array(&self, start: usize, end: usize) -> Result<Arc<dyn ColumnArray>, OccError>;

    /// Element-wise missing-value test.
    fn is_null_mask(&self) -> Vec<bool>;

    /// Shallow or deep copy.
    fn copy_array(&self, deep: bool) -> Arc<dyn ColumnArray>;

    /// Appends `others` after `self`; all parts must share this column's type.
    fn concat_arrays(
        &self,
        others: &[Arc<dyn ColumnArray>],
    ) -> Result<Arc<dyn ColumnArray>, OccError>;

    /// Gathers by position; `-1` is the missing marker when `allow_fill` is set.
    fn take_array(
        &self,
        indices: &[i64],
        allow_fill: bool,
        fill_value: Option<&str>,
    ) -> Result<Arc<dyn ColumnArray>, OccError>;

    /// Downcasting hook for typed accessors.
    fn as_any(&self) -> &dyn Any;
}

/// Vectorised OCC queries.
pub trait OccColumnOps {
    /// `true` where the element is a call.
    fn is_call(&self) -> Vec<bool>;

    /// `true` where the element is a put.
    fn is_put(&self) -> Vec<bool>;

    /// `true` where the expiry is strictly before `as_of`.
    fn is_expired(&self, as_of: NaiveDate) -> Vec<bool>;

    /// [`OccColumnOps::is_expired`] against today's local date.
    fn is_expired_today(&self) -> Vec<bool> {
        self.is_expired(Local::now().date_naive())
    }
}
