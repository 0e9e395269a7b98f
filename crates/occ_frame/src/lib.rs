//! # occ_frame: Host Glue for OCC Columns
//!
//! ## Layer 2 (Integration) Role
//!
//! occ_frame exposes the `"occ"` column from occ_core to a dataframe-style
//! host, providing:
//! - A process-wide column-type registry (`registry`)
//! - Labeled series and boolean results (`series`, `index`)
//! - The `.occ` accessor with eager type validation (`accessor`)
//! - A plain `"string"` column for mixed-type hosts (`string_column`)
//! - TOML/environment configuration (`config`) and log setup (`telemetry`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use occ_frame::{registry, Series};
//!
//! registry::register_builtin_types();
//!
//! let series = Series::from_strings(
//!     "occ",
//!     ["AAPL  200625C00125000", "SPY   240119P00472500"],
//! )
//! .unwrap()
//! .with_name("contracts");
//!
//! let puts = series.occ().unwrap().is_put();
//! let only_puts = series.filter(&puts).unwrap();
//! assert_eq!(only_puts.len(), 1);
//!
//! let as_of = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! assert_eq!(series.occ().unwrap().is_expired(as_of).count_true(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accessor;
pub mod config;
pub mod error;
pub mod index;
pub mod registry;
pub mod series;
pub mod string_column;
pub mod telemetry;

pub use accessor::OccAccessor;
pub use config::{ConfigError, FrameConfig};
pub use error::{FrameError, RegistryError};
pub use index::Index;
pub use registry::ColumnTypeDescriptor;
pub use series::{BoolSeries, Series};
pub use string_column::StringColumn;
pub use telemetry::init_tracing;
