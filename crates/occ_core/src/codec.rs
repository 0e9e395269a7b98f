//! OCC symbol codec.
//!
//! Converts between the 21-character OCC wire format
//! `SSSSSSYYMMDDTNNNNNNNN` and [`OccRecord`]:
//!
//! | Bytes | Field | Notes |
//! |-------|-------|-------|
//! | 0-5   | symbol | left-justified, space-padded |
//! | 6-11  | expiry | `YYMMDD`, two-digit year |
//! | 12    | type   | `P` = put, anything else = call |
//! | 13-20 | strike | thousandths, zero-padded to 8 digits |
//!
//! Two-digit years are resolved with a century pivot: years at or above the
//! pivot belong to the 1900s, years below it to the 2000s. The default pivot
//! of 69 gives the window 1969-2068.
//!
//! # Examples
//!
//! ```
//! use occ_core::codec::{decode, encode};
//!
//! let record = decode("AAPL  200625C00125000").unwrap();
//! assert_eq!(record.symbol(), "AAPL");
//! assert_eq!(record.strike(), 125.0);
//! assert_eq!(encode(&record).unwrap(), "AAPL  200625C00125000");
//! ```

use chrono::{Datelike, NaiveDate};

use crate::error::{FormatError, OccError, RangeError};
use crate::store::RecordStore;
use crate::types::record::{OccRecord, SYMBOL_WIDTH};

/// Length of an OCC symbol string.
pub const OCC_SYMBOL_LEN: usize = 21;

/// Default two-digit-year pivot (1969-2068 window).
pub const DEFAULT_CENTURY_PIVOT: u8 = 69;

const DATE_START: usize = SYMBOL_WIDTH;
const TYPE_POS: usize = DATE_START + 6;
const STRIKE_START: usize = TYPE_POS + 1;

/// Stateless OCC codec parameterised by its two-digit-year pivot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OccCodec {
    century_pivot: u8,
}

impl Default for OccCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl OccCodec {
    /// Creates a codec with the default pivot.
    pub const fn new() -> Self {
        Self {
            century_pivot: DEFAULT_CENTURY_PIVOT,
        }
    }

    /// Creates a codec with a custom pivot in `0..=99`.
    ///
    /// Returns `None` for a pivot of 100 or more.
    ///
    /// # Examples
    ///
    /// ```
    /// use occ_core::codec::OccCodec;
    ///
    /// let codec = OccCodec::with_century_pivot(50).unwrap();
    /// assert_eq!(codec.year_window(), (1950, 2049));
    /// assert!(OccCodec::with_century_pivot(100).is_none());
    /// ```
    pub fn with_century_pivot(century_pivot: u8) -> Option<Self> {
        (century_pivot < 100).then_some(Self { century_pivot })
    }

    /// Returns the two-digit-year pivot.
    #[inline]
    pub fn century_pivot(&self) -> u8 {
        self.century_pivot
    }

    /// Returns the first and last year (inclusive) the codec can represent.
    pub fn year_window(&self) -> (i32, i32) {
        let first = 1900 + i32::from(self.century_pivot);
        (first, first + 99)
    }

    /// Decodes one OCC symbol string.
    ///
    /// # Errors
    /// `FormatError` when the input is not 21 ASCII bytes, the date is not a
    /// valid `YYMMDD` date, or the strike field is not 8 digits.
    pub fn decode(&self, s: &str) -> Result<OccRecord, FormatError> {
        if s.len() != OCC_SYMBOL_LEN {
            return Err(FormatError::InvalidLength { len: s.len() });
        }
        if !s.is_ascii() {
            return Err(FormatError::NonAscii {
                input: s.to_string(),
            });
        }

        let bytes = s.as_bytes();
        let expiry = self.parse_date(&s[DATE_START..TYPE_POS])?;
        let is_put = bytes[TYPE_POS] == b'P';
        let strike_milli = parse_strike(&s[STRIKE_START..])?;

        let mut symbol = [b' '; SYMBOL_WIDTH];
        symbol.copy_from_slice(&bytes[..SYMBOL_WIDTH]);

        Ok(OccRecord::from_raw_parts(symbol, expiry, is_put, strike_milli))
    }

    /// Decodes a batch into a store that reads back with this codec.
    ///
    /// # Errors
    /// The first malformed entry fails the whole batch as
    /// `OccError::Batch { index, .. }`.
    pub fn decode_all<I, S>(&self, values: I) -> Result<RecordStore, OccError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RecordStore::from_strings_with(*self, values)
    }

    /// Checks that `record`'s expiry year lies in this codec's window.
    ///
    /// # Errors
    /// `RangeError::ExpiryOutOfWindow` otherwise.
    pub fn check_window(&self, record: &OccRecord) -> Result<(), RangeError> {
        let year = record.expiry().year();
        let (first, last) = self.year_window();
        if (first..=last).contains(&year) {
            Ok(())
        } else {
            Err(RangeError::ExpiryOutOfWindow { year, first, last })
        }
    }

    /// Encodes a record to its canonical 21-character form.
    ///
    /// # Errors
    /// - `RangeError::NonAsciiSymbol` / `StrikeOutOfRange` when the record's
    ///   fields do not fit the wire format
    /// - `RangeError::ExpiryOutOfWindow` when the expiry year would not decode
    ///   back to the same century under this codec's pivot
    pub fn encode(&self, record: &OccRecord) -> Result<String, RangeError> {
        record.validate()?;
        self.check_window(record)?;
        let expiry = record.expiry();

        let mut out = String::with_capacity(OCC_SYMBOL_LEN);
        out.extend(record.padded_symbol().iter().map(|&b| char::from(b)));
        out.push_str(&format!(
            "{:02}{:02}{:02}{}{:08}",
            expiry.year() % 100,
            expiry.month(),
            expiry.day(),
            if record.is_put() { 'P' } else { 'C' },
            record.strike_milli()
        ));
        Ok(out)
    }

    /// Validates loose fields and encodes them in one step.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use occ_core::codec::OccCodec;
    ///
    /// let expiry = NaiveDate::from_ymd_opt(2024, 1, 19).unwrap();
    /// let s = OccCodec::new().encode_parts("SPY", expiry, true, 472.5).unwrap();
    /// assert_eq!(s, "SPY   240119P00472500");
    /// ```
    pub fn encode_parts(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        is_put: bool,
        strike: f64,
    ) -> Result<String, RangeError> {
        let record = OccRecord::new(symbol, expiry, is_put, strike)?;
        self.encode(&record)
    }

    fn parse_date(&self, field: &str) -> Result<NaiveDate, FormatError> {
        let invalid = || FormatError::InvalidDate {
            field: field.to_string(),
        };

        let digits = field.as_bytes();
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let pair = |i: usize| u32::from(digits[i] - b'0') * 10 + u32::from(digits[i + 1] - b'0');

        let yy = pair(0);
        let year = if yy >= u32::from(self.century_pivot) {
            1900 + yy as i32
        } else {
            2000 + yy as i32
        };

        NaiveDate::from_ymd_opt(year, pair(2), pair(4)).ok_or_else(invalid)
    }
}

fn parse_strike(field: &str) -> Result<u32, FormatError> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidStrike {
            field: field.to_string(),
        });
    }
    // Eight digits always fit in u32.
    Ok(field
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')))
}

/// Decodes with the default codec.
pub fn decode(s: &str) -> Result<OccRecord, FormatError> {
    OccCodec::new().decode(s)
}

/// Decodes a batch with the default codec.
pub fn decode_all<I, S>(values: I) -> Result<RecordStore, OccError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    OccCodec::new().decode_all(values)
}

/// Encodes with the default codec.
pub fn encode(record: &OccRecord) -> Result<String, RangeError> {
    OccCodec::new().encode(record)
}

/// Validates and encodes loose fields with the default codec.
pub fn encode_parts(
    symbol: &str,
    expiry: NaiveDate,
    is_put: bool,
    strike: f64,
) -> Result<String, RangeError> {
    OccCodec::new().encode_parts(symbol, expiry, is_put, strike)
}
