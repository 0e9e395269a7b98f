//! Boxed scalar for a single OCC symbol.

use std::fmt;
use std::str::FromStr;

use crate::codec::OccCodec;
use crate::error::{OccError, RangeError};
use crate::types::record::OccRecord;

/// A validated, canonical 21-character OCC symbol.
///
/// This is the scalar type a host framework sees for one element of an
/// `"occ"` column.
///
/// # Examples
///
/// ```
/// use occ_core::types::OccSymbol;
///
/// let sym: OccSymbol = "AAPL  200625C00125000".parse().unwrap();
/// assert_eq!(sym.as_str(), "AAPL  200625C00125000");
/// assert_eq!(sym.record().symbol(), "AAPL");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct OccSymbol {
    text: String,
    record: OccRecord,
}

impl OccSymbol {
    /// Parses with the default codec and stores the canonical form.
    ///
    /// # Errors
    /// `OccError::Format` for a malformed string.
    pub fn parse(s: &str) -> Result<Self, OccError> {
        let codec = OccCodec::new();
        let record = codec.decode(s)?;
        Ok(Self::from_record(record, &codec)?)
    }

    /// Encodes a record into a scalar.
    pub fn from_record(record: OccRecord, codec: &OccCodec) -> Result<Self, RangeError> {
        Ok(Self {
            text: codec.encode(&record)?,
            record,
        })
    }

    /// Returns the canonical string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the decoded record.
    pub fn record(&self) -> &OccRecord {
        &self.record
    }

    /// Consumes the scalar, returning the canonical string.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl FromStr for OccSymbol {
    type Err = OccError;

    fn from_str(s: &str) -> Result<Self, OccError> {
        OccSymbol::parse(s)
    }
}

impl TryFrom<String> for OccSymbol {
    type Error = OccError;

    fn try_from(s: String) -> Result<Self, OccError> {
        OccSymbol::parse(&s)
    }
}

impl From<OccSymbol> for String {
    fn from(sym: OccSymbol) -> Self {
        sym.text
    }
}

impl AsRef<str> for OccSymbol {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OccSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalises_flag() {
        let sym = OccSymbol::parse("AAPL  200625X00125000").unwrap();
        assert_eq!(sym.as_str(), "AAPL  200625C00125000");
        assert!(sym.record().is_call());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            "AAPL".parse::<OccSymbol>().unwrap_err(),
            OccError::Format(crate::error::FormatError::InvalidLength { len: 4 })
        );
    }

    #[test]
    fn test_display() {
        let sym = OccSymbol::parse("SPY   240119P00472500").unwrap();
        assert_eq!(format!("{}", sym), "SPY   240119P00472500");
        assert_eq!(String::from(sym), "SPY   240119P00472500");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let sym = OccSymbol::parse("SPY   240119P00472500").unwrap();
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"SPY   240119P00472500\"");
        let parsed: OccSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sym);
        assert!(serde_json::from_str::<OccSymbol>("\"bad\"").is_err());
    }
}
