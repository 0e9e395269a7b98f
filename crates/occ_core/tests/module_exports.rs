//! Integration tests for module exports and cross-module behaviour.

use chrono::NaiveDate;

/// Test that codec functions are accessible via absolute path.
#[test]
fn test_codec_module_exports() {
    use occ_core::codec::{decode, encode, encode_parts, OccCodec, OCC_SYMBOL_LEN};

    let record = decode("AAPL  200625C00125000").unwrap();
    assert_eq!(encode(&record).unwrap().len(), OCC_SYMBOL_LEN);

    let expiry = NaiveDate::from_ymd_opt(2020, 6, 25).unwrap();
    assert_eq!(
        encode_parts("AAPL", expiry, false, 125.0).unwrap(),
        OccCodec::default().encode(&record).unwrap()
    );
}

/// Test that crate-root re-exports resolve.
#[test]
fn test_root_reexports() {
    use occ_core::{
        ColumnArray, FormatError, OccColumn, OccColumnOps, OccError, OccRecord, OccSymbol,
        RecordStore, OCC_TYPE_NAME,
    };

    let column = OccColumn::from_store(RecordStore::null(1));
    assert_eq!(ColumnArray::type_name(&column), OCC_TYPE_NAME);
    assert_eq!(column.is_call(), vec![true]);
    assert_eq!(column.store().record(0), Some(&OccRecord::NULL));

    let err: OccError = FormatError::InvalidLength { len: 1 }.into();
    assert!(err.to_string().contains("21"));
    assert!("x".parse::<OccSymbol>().is_err());
}

/// The example from the wire-format description decodes field by field.
#[test]
fn test_documented_example() {
    let record = occ_core::codec::decode("AAPL  200625C00125000").unwrap();
    assert_eq!(record.symbol(), "AAPL");
    assert_eq!(record.expiry(), NaiveDate::from_ymd_opt(2020, 6, 25).unwrap());
    assert!(!record.is_put());
    assert_eq!(record.strike_milli(), 125_000);
}
