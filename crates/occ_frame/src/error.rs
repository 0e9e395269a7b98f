//! Error types for the host glue layer.

use occ_core::error::{OccError, TypeError};
use thiserror::Error;

use crate::config::ConfigError;

/// Column-type registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A descriptor with this name is already registered.
    #[error("Column type '{name}' is already registered")]
    AlreadyRegistered {
        /// The duplicate type name
        name: String,
    },
}

/// Host-level error type.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Column operation failed
    #[error(transparent)]
    Occ(#[from] OccError),

    /// Type lookup or accessor validation failed
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Index and column lengths differ
    #[error("Length mismatch: index has {index} labels, column has {column} elements")]
    LengthMismatch {
        /// Number of index labels
        index: usize,
        /// Number of column elements
        column: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FrameError::LengthMismatch {
            index: 2,
            column: 3,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: index has 2 labels, column has 3 elements"
        );

        let err: FrameError = RegistryError::AlreadyRegistered {
            name: "occ".to_string(),
        }
        .into();
        assert!(err.to_string().contains("'occ'"));
    }
}
