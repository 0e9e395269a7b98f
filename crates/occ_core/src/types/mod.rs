//! Core value types.
//!
//! This module provides:
//! - `record`: The fixed-width decoded record `OccRecord` and its null sentinel
//! - `symbol`: The boxed scalar `OccSymbol` returned for single elements
//!
//! # Re-exports
//!
//! - [`OccRecord`], [`SYMBOL_WIDTH`], [`MAX_STRIKE_MILLI`] from `record`
//! - [`OccSymbol`] from `symbol`

pub mod record;
pub mod symbol;

pub use record::{OccRecord, MAX_STRIKE_MILLI, SYMBOL_WIDTH};
pub use symbol::OccSymbol;
