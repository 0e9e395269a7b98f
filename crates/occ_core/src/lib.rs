//! # occ_core: OCC Option-Symbol Codec and Columnar Store
//!
//! ## Layer 1 (Foundation) Role
//!
//! occ_core is the bottom layer of the workspace, providing:
//! - The 21-character OCC symbol codec (`codec`)
//! - The fixed-width decoded record and boxed scalar (`types`)
//! - A reference-counted columnar buffer of records (`store`)
//! - The `"occ"` column type (`column`)
//! - Host and domain contracts: `ColumnArray`, `OccColumnOps` (`traits`)
//! - Error types: `FormatError`, `RangeError`, `TypeError`, `IndexError` (`error`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other workspace crates:
//! - chrono: Calendar dates
//! - thiserror: Error derivation
//! - tracing: Structured diagnostics for bulk operations
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use occ_core::codec::{decode, encode};
//! use occ_core::column::OccColumn;
//! use occ_core::traits::OccColumnOps;
//!
//! // Single symbol round trip
//! let record = decode("AAPL  200625C00125000").unwrap();
//! assert_eq!(record.symbol(), "AAPL");
//! assert_eq!(encode(&record).unwrap(), "AAPL  200625C00125000");
//!
//! // Column of symbols
//! let column = OccColumn::from_sequence([
//!     "AAPL  200625C00125000",
//!     "SPY   240119P00472500",
//! ])
//! .unwrap();
//! assert_eq!(column.is_put(), vec![false, true]);
//! assert_eq!(column.element_at(1).unwrap(), "SPY   240119P00472500");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OccRecord` and `OccSymbol`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod codec;
pub mod column;
pub mod error;
pub mod store;
pub mod traits;
pub mod types;

pub use codec::OccCodec;
pub use column::{OccColumn, OCC_TYPE_NAME};
pub use error::{FormatError, IndexError, OccError, RangeError, TypeError};
pub use store::RecordStore;
pub use traits::{ColumnArray, OccColumnOps};
pub use types::{OccRecord, OccSymbol};
