//! End-to-end tests: registry, series, accessor and configuration together.

use anyhow::Result;
use chrono::NaiveDate;
use occ_core::error::{FormatError, OccError, TypeError};
use occ_frame::{registry, FrameConfig, FrameError, Index, Series};

const BOOK: [&str; 4] = [
    "AAPL  200625C00125000",
    "SPY   240119P00472500",
    "TSLA  210319C00700000",
    "QQQ   251219P00400000",
];

fn book() -> Result<Series> {
    registry::register_builtin_types();
    let series = Series::from_strings("occ", BOOK)?
        .with_name("book")
        .with_index(Index::from_labels(["a", "b", "c", "d"]))?;
    Ok(series)
}

#[test]
fn test_filter_puts() -> Result<()> {
    let series = book()?;
    let puts = series.occ()?.is_put();
    let only_puts = series.filter(&puts)?;

    assert_eq!(only_puts.len(), 2);
    assert_eq!(only_puts.index().labels(), vec!["b", "d"]);
    assert_eq!(only_puts.element_at(0)?.as_deref(), Some(BOOK[1]));
    assert!(only_puts.occ()?.is_put().values().iter().all(|&p| p));
    Ok(())
}

#[test]
fn test_expired_contracts() -> Result<()> {
    let series = book()?;
    let as_of = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let expired = series.occ()?.is_expired(as_of);

    assert_eq!(expired.values(), &[true, false, true, false]);
    let live = series.filter(&!&expired)?;
    assert_eq!(live.index().labels(), vec!["b", "d"]);
    Ok(())
}

#[test]
fn test_accessor_rejects_strings() -> Result<()> {
    registry::register_builtin_types();
    let series = Series::from_strings("string", ["not", "options"])?;
    assert!(matches!(
        series.occ(),
        Err(TypeError::NotOccType { ref found }) if found == "string"
    ));
    Ok(())
}

#[test]
fn test_unknown_dtype() {
    registry::register_builtin_types();
    let err = Series::from_strings("decimal", ["1.0"]).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Type(TypeError::UnknownType { .. })
    ));
}

#[test]
fn test_bad_symbol_reports_position() {
    registry::register_builtin_types();
    let err = Series::from_strings("occ", [BOOK[0], "SPY 240119P472500"]).unwrap_err();
    match err {
        FrameError::Occ(OccError::Batch { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(
                *source,
                OccError::Format(FormatError::InvalidLength { len: 17 })
            ));
        }
        other => panic!("Expected batch error, got {:?}", other),
    }
}

#[test]
fn test_append_and_head() -> Result<()> {
    let series = book()?;
    let doubled = series.append(&series)?;
    assert_eq!(doubled.len(), 8);
    assert_eq!(doubled.occ()?.is_call().count_true(), 4);

    let head = doubled.head(5)?;
    assert_eq!(head.element_at(4)?.as_deref(), Some(BOOK[0]));
    Ok(())
}

#[test]
fn test_configured_pivot_reaches_series() -> Result<()> {
    registry::register_builtin_types();
    let config = FrameConfig::from_toml_str("century_pivot = 80")?;
    config.validate()?;

    let series = Series::from_strings_with(&config, "occ", ["IBM   750101C00001000", BOOK[1]])?;
    assert_eq!(series.element_at(0)?.as_deref(), Some("IBM   750101C00001000"));

    let as_of = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    assert_eq!(series.occ()?.is_expired(as_of).values(), &[false, true]);

    let column = series.occ()?.column();
    assert_eq!(column.store().codec(), config.codec()?);
    assert_eq!(
        column.store().record(0).map(|r| r.expiry()),
        NaiveDate::from_ymd_opt(2075, 1, 1)
    );

    // The default codec reads "75" as 1975.
    let default = Series::from_strings("occ", ["IBM   750101C00001000"])?;
    assert_eq!(default.occ()?.is_expired(as_of).values(), &[true]);
    Ok(())
}

#[test]
fn test_invalid_configured_pivot() {
    registry::register_builtin_types();
    let config = FrameConfig {
        century_pivot: 150,
        ..FrameConfig::default()
    };
    let err = Series::from_strings_with(&config, "occ", [BOOK[0]]).unwrap_err();
    assert!(matches!(err, FrameError::Config(_)));
}

#[test]
fn test_append_across_pivots_fails_fast() -> Result<()> {
    registry::register_builtin_types();
    let config = FrameConfig::from_toml_str("century_pivot = 80")?;
    let late = Series::from_strings_with(&config, "occ", ["IBM   750101C00001000"])?;
    let early = Series::from_strings("occ", [BOOK[0]])?;

    let err = early.append(&late).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Occ(OccError::Batch { index: 1, .. })
    ));
    assert_eq!(late.append(&early)?.len(), 2);
    Ok(())
}
