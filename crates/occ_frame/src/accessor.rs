//! `.occ` accessor for series of OCC symbols.
//!
//! The accessor is validated when it is created: asking for it on a series
//! whose column is not `"occ"` fails immediately with
//! [`TypeError::NotOccType`], before any query runs. Every query returns a
//! [`BoolSeries`] carrying the source series' index and name.

use chrono::NaiveDate;
use occ_core::column::{OccColumn, OCC_TYPE_NAME};
use occ_core::error::TypeError;
use occ_core::traits::OccColumnOps;

use crate::series::{BoolSeries, Series};

/// Typed view over a series whose column is an [`OccColumn`].
#[derive(Clone, Copy, Debug)]
pub struct OccAccessor<'a> {
    series: &'a Series,
    column: &'a OccColumn,
}

impl<'a> OccAccessor<'a> {
    /// Validates `series` and wraps it.
    ///
    /// # Errors
    /// `TypeError::NotOccType` if the column is not an OCC column.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use occ_frame::registry;
    /// use occ_frame::series::Series;
    ///
    /// registry::register_builtin_types();
    /// let series = Series::from_strings(
    ///     "occ",
    ///     ["AAPL  200625C00125000", "SPY   240119P00472500"],
    /// )
    /// .unwrap();
    ///
    /// let occ = series.occ().unwrap();
    /// assert_eq!(occ.is_put().values(), &[false, true]);
    ///
    /// let as_of = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    /// assert_eq!(occ.is_expired(as_of).values(), &[true, false]);
    /// ```
    pub fn new(series: &'a Series) -> Result<Self, TypeError> {
        let values = series.values();
        let column = if values.type_name() == OCC_TYPE_NAME {
            values.as_any().downcast_ref::<OccColumn>()
        } else {
            None
        };
        match column {
            Some(column) => Ok(Self { series, column }),
            None => {
                tracing::debug!(dtype = values.type_name(), "Rejected .occ accessor");
                Err(TypeError::NotOccType {
                    found: values.type_name().to_string(),
                })
            }
        }
    }

    /// The wrapped column.
    pub fn column(&self) -> &'a OccColumn {
        self.column
    }

    /// `true` where the contract is a call.
    pub fn is_call(&self) -> BoolSeries {
        self.query(|ops| ops.is_call())
    }

    /// `true` where the contract is a put.
    pub fn is_put(&self) -> BoolSeries {
        self.query(|ops| ops.is_put())
    }

    /// `true` where the expiry is strictly before `as_of`.
    pub fn is_expired(&self, as_of: NaiveDate) -> BoolSeries {
        self.query(|ops| ops.is_expired(as_of))
    }

    /// `true` where the expiry is strictly before today's local date.
    pub fn is_expired_today(&self) -> BoolSeries {
        self.query(|ops| ops.is_expired_today())
    }

    fn query(&self, f: impl FnOnce(&dyn OccColumnOps) -> Vec<bool>) -> BoolSeries {
        self.series.labeled(f(self.column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Index;
    use crate::string_column::StringColumn;
    use std::sync::Arc;

    const AAPL: &str = "AAPL  200625C00125000";
    const SPY: &str = "SPY   240119P00472500";
    const FAR: &str = "SPX   681215P04500000";

    fn occ_series() -> Series {
        let column = OccColumn::from_sequence([AAPL, SPY, FAR]).unwrap();
        Series::new(
            Arc::new(column),
            Some(Index::from_labels(["x", "y", "z"])),
            Some("book".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_string_series() {
        let series =
            Series::new(Arc::new(StringColumn::from_sequence([AAPL])), None, None).unwrap();
        let err = series.occ().unwrap_err();
        assert_eq!(
            err,
            TypeError::NotOccType {
                found: "string".to_string()
            }
        );
        assert!(err.to_string().contains("'string'"));
    }

    #[test]
    fn test_call_put() {
        let series = occ_series();
        let occ = series.occ().unwrap();
        assert_eq!(occ.is_call().values(), &[true, false, false]);
        assert_eq!(occ.is_put().values(), &[false, true, true]);
    }

    #[test]
    fn test_results_keep_labels() {
        let series = occ_series();
        let puts = series.occ().unwrap().is_put();
        assert_eq!(puts.index(), series.index());
        assert_eq!(puts.name(), Some("book"));
    }

    #[test]
    fn test_is_expired_boundary() {
        let series = occ_series();
        let occ = series.occ().unwrap();

        let on_expiry = NaiveDate::from_ymd_opt(2020, 6, 25).unwrap();
        assert_eq!(occ.is_expired(on_expiry).values(), &[false, false, false]);

        let day_after = NaiveDate::from_ymd_opt(2020, 6, 26).unwrap();
        assert_eq!(occ.is_expired(day_after).values(), &[true, false, false]);
    }

    #[test]
    fn test_is_expired_today() {
        let series = occ_series();
        let today = series.occ().unwrap().is_expired_today();
        // 2020 and 2024 expiries are past; 2068 is not.
        assert_eq!(today.values(), &[true, true, false]);
    }

    #[test]
    fn test_column_access() {
        let series = occ_series();
        let occ = series.occ().unwrap();
        assert_eq!(occ.column().len(), 3);
        assert_eq!(occ.column().element_at(1).unwrap(), SPY);
    }
}
