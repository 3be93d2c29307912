//! The module contains the errors the engine can throw.
//!
//! Four of them leave the store untouched and the shells recover from them
//! locally:
//!
//! - [`CategoryNotFound`] when an update/delete names an unknown category.
//! - [`IndexOutOfRange`] when the position is outside the category list.
//! - [`InvalidAmount`] when a value cannot be used as an amount.
//! - [`TotalOverflow`] when a summary total does not fit a finite amount.
//!
//! The remaining two come from the persisted file and are reported with the
//! path (and operation) that failed.
//!
//!  [`CategoryNotFound`]: EngineError::CategoryNotFound
//!  [`IndexOutOfRange`]: EngineError::IndexOutOfRange
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`TotalOverflow`]: EngineError::TotalOverflow
use std::path::PathBuf;

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" category not found!")]
    CategoryNotFound(String),
    #[error("index {index} is out of range for \"{category}\" ({len} transactions)")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("total of {0} is too large to display")]
    TotalOverflow(String),
    #[error("malformed data in {}: {source}", path.display())]
    MalformedData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by user input, which leave the store
    /// untouched and can be reported without stopping the program.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::IndexOutOfRange { .. }
                | Self::InvalidAmount(_)
                | Self::TotalOverflow(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::CategoryNotFound(a), Self::CategoryNotFound(b)) => a == b,
            (
                Self::IndexOutOfRange {
                    category: a,
                    index: i,
                    len: l,
                },
                Self::IndexOutOfRange {
                    category: b,
                    index: j,
                    len: m,
                },
            ) => a == b && i == j && l == m,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::TotalOverflow(a), Self::TotalOverflow(b)) => a == b,
            (
                Self::MalformedData {
                    path: a,
                    source: e1,
                },
                Self::MalformedData {
                    path: b,
                    source: e2,
                },
            ) => a == b && e1.to_string() == e2.to_string(),
            (
                Self::Io {
                    op: o1,
                    path: a,
                    source: e1,
                },
                Self::Io {
                    op: o2,
                    path: b,
                    source: e2,
                },
            ) => o1 == o2 && a == b && e1.kind() == e2.kind(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_recoverable() {
        assert!(EngineError::CategoryNotFound("food".to_string()).is_recoverable());
        assert!(
            EngineError::IndexOutOfRange {
                category: "food".to_string(),
                index: 3,
                len: 1,
            }
            .is_recoverable()
        );
        assert!(EngineError::InvalidAmount("abc".to_string()).is_recoverable());
        assert!(EngineError::TotalOverflow("\"food\"".to_string()).is_recoverable());
    }

    #[test]
    fn io_errors_name_operation_and_path() {
        let err = EngineError::io(
            "write",
            "/tmp/ledger.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "failed to write /tmp/ledger.json: denied");
    }
}
