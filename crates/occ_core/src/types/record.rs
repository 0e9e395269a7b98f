//! Fixed-width decoded OCC record.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use occ_core::types::OccRecord;
//!
//! let expiry = NaiveDate::from_ymd_opt(2020, 6, 25).unwrap();
//! let record = OccRecord::new("AAPL", expiry, false, 125.0).unwrap();
//! assert_eq!(record.symbol(), "AAPL");
//! assert_eq!(record.strike_milli(), 125_000);
//! assert!(record.is_call());
//! ```

use chrono::{Datelike, NaiveDate};

use crate::error::RangeError;

/// Width of the packed, space-padded symbol slot.
pub const SYMBOL_WIDTH: usize = 6;

/// Largest strike in thousandths that fits the eight-digit strike field.
pub const MAX_STRIKE_MILLI: u32 = 99_999_999;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One decoded option symbol.
///
/// Stored as a fixed-width value: a space-padded 6-byte symbol slot, the
/// expiry as days since 1970-01-01, the option-type flag, and the strike as
/// an integer number of thousandths. Construction validates every field, so
/// any `OccRecord` is encodable apart from the codec's century window.
///
/// The all-default record ([`OccRecord::NULL`]) is the missing-value
/// sentinel: blank symbol, epoch expiry, call, zero strike.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOccRecord"))]
pub struct OccRecord {
    symbol: [u8; SYMBOL_WIDTH],
    expiry_days: i32,
    is_put: bool,
    strike_milli: u32,
}

impl OccRecord {
    /// In-memory width of one record, used for byte-size reporting.
    pub const WIDTH: usize = std::mem::size_of::<OccRecord>();

    /// The missing-value sentinel.
    pub const NULL: OccRecord = OccRecord {
        symbol: [b' '; SYMBOL_WIDTH],
        expiry_days: 0,
        is_put: false,
        strike_milli: 0,
    };

    /// Creates a record from a strike price.
    ///
    /// The strike is converted to thousandths with `round(strike * 1000)`.
    ///
    /// # Errors
    /// - `RangeError::SymbolTooLong` / `NonAsciiSymbol` for a bad symbol
    /// - `RangeError::NegativeStrike` for a negative or non-finite strike
    /// - `RangeError::StrikeOutOfRange` when the rounded strike exceeds eight digits
    pub fn new(
        symbol: &str,
        expiry: NaiveDate,
        is_put: bool,
        strike: f64,
    ) -> Result<Self, RangeError> {
        let strike_milli = strike_to_milli(strike)?;
        Self::from_milli(symbol, expiry, is_put, strike_milli)
    }

    /// Creates a record from a strike already expressed in thousandths.
    pub fn from_milli(
        symbol: &str,
        expiry: NaiveDate,
        is_put: bool,
        strike_milli: u32,
    ) -> Result<Self, RangeError> {
        if strike_milli > MAX_STRIKE_MILLI {
            return Err(RangeError::StrikeOutOfRange {
                strike: f64::from(strike_milli) / 1000.0,
            });
        }

        Ok(Self {
            symbol: pad_symbol(symbol)?,
            expiry_days: expiry.num_days_from_ce() - EPOCH_DAYS_FROM_CE,
            is_put,
            strike_milli,
        })
    }

    /// Assembles a record from already-validated fields.
    pub(crate) fn from_raw_parts(
        symbol: [u8; SYMBOL_WIDTH],
        expiry: NaiveDate,
        is_put: bool,
        strike_milli: u32,
    ) -> Self {
        debug_assert!(strike_milli <= MAX_STRIKE_MILLI);
        Self {
            symbol,
            expiry_days: expiry.num_days_from_ce() - EPOCH_DAYS_FROM_CE,
            is_put,
            strike_milli,
        }
    }

    /// Checks the field invariants that make a record encodable.
    ///
    /// # Errors
    /// - `RangeError::NonAsciiSymbol` if the symbol slot holds non-ASCII bytes
    /// - `RangeError::StrikeOutOfRange` if the strike exceeds eight digits
    pub fn validate(&self) -> Result<(), RangeError> {
        if !self.symbol.is_ascii() {
            return Err(RangeError::NonAsciiSymbol {
                symbol: String::from_utf8_lossy(&self.symbol).into_owned(),
            });
        }
        if self.strike_milli > MAX_STRIKE_MILLI {
            return Err(RangeError::StrikeOutOfRange {
                strike: f64::from(self.strike_milli) / 1000.0,
            });
        }
        Ok(())
    }

    /// Returns the underlying ticker with padding removed.
    pub fn symbol(&self) -> &str {
        let end = self
            .symbol
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |i| i + 1);
        std::str::from_utf8(&self.symbol[..end]).unwrap_or_default()
    }

    /// Returns the packed, space-padded symbol slot.
    #[inline]
    pub fn padded_symbol(&self) -> &[u8; SYMBOL_WIDTH] {
        &self.symbol
    }

    /// Returns the expiry date.
    pub fn expiry(&self) -> NaiveDate {
        self.expiry_days
            .checked_add(EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the expiry as days since 1970-01-01.
    #[inline]
    pub fn expiry_days(&self) -> i32 {
        self.expiry_days
    }

    /// Returns `true` for a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        self.is_put
    }

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        !self.is_put
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        f64::from(self.strike_milli) / 1000.0
    }

    /// Returns the strike as a 32-bit float.
    ///
    /// Lossy above 16777.216; use [`OccRecord::strike_milli`] for exact values.
    #[inline]
    pub fn strike_f32(&self) -> f32 {
        self.strike() as f32
    }

    /// Returns the strike in thousandths.
    #[inline]
    pub fn strike_milli(&self) -> u32 {
        self.strike_milli
    }

    /// Returns `true` if this record is the missing-value sentinel.
    ///
    /// A legitimately decoded `"      700101C00000000"` is indistinguishable
    /// from a missing value and also reports `true`.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.symbol.iter().all(|&b| b == b' ' || b == 0)
            && self.expiry_days == 0
            && !self.is_put
            && self.strike_milli == 0
    }

    /// Returns `true` if the expiry is strictly before `as_of`.
    #[inline]
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiry_days < as_of.num_days_from_ce() - EPOCH_DAYS_FROM_CE
    }
}

impl Default for OccRecord {
    fn default() -> Self {
        Self::NULL
    }
}

/// Unchecked wire shape of [`OccRecord`]; validated on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOccRecord {
    symbol: [u8; SYMBOL_WIDTH],
    expiry_days: i32,
    is_put: bool,
    strike_milli: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOccRecord> for OccRecord {
    type Error = RangeError;

    fn try_from(raw: RawOccRecord) -> Result<Self, RangeError> {
        let record = OccRecord {
            symbol: raw.symbol,
            expiry_days: raw.expiry_days,
            is_put: raw.is_put,
            strike_milli: raw.strike_milli,
        };
        record.validate()?;
        Ok(record)
    }
}

fn pad_symbol(symbol: &str) -> Result<[u8; SYMBOL_WIDTH], RangeError> {
    if !symbol.is_ascii() {
        return Err(RangeError::NonAsciiSymbol {
            symbol: symbol.to_string(),
        });
    }
    if symbol.len() > SYMBOL_WIDTH {
        return Err(RangeError::SymbolTooLong {
            symbol: symbol.to_string(),
        });
    }

    let mut slot = [b' '; SYMBOL_WIDTH];
    slot[..symbol.len()].copy_from_slice(symbol.as_bytes());
    Ok(slot)
}

fn strike_to_milli(strike: f64) -> Result<u32, RangeError> {
    if !strike.is_finite() || strike < 0.0 {
        return Err(RangeError::NegativeStrike { strike });
    }

    let milli = (strike * 1000.0).round();
    if milli > f64::from(MAX_STRIKE_MILLI) {
        return Err(RangeError::StrikeOutOfRange { strike });
    }
    Ok(milli as u32)
}
