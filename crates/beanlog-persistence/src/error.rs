//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;

use beanlog_model::Violation;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slot store refused a value larger than its quota.
    #[error("Storage quota exceeded for slot {key} ({size} bytes, limit {quota})")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },

    /// Content is not JSON at all.
    #[error("Backup is not valid JSON")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// A required top-level key is absent.
    #[error("Backup is missing the `{key}` collection")]
    MissingKey { key: &'static str },

    /// JSON does not match the bean/shot schema.
    #[error("Backup does not match the expected format")]
    Schema {
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed backup whose data breaks model invariants.
    #[error("Backup contains {} invalid record(s)", .violations.len())]
    Invalid { violations: Vec<Violation> },

    /// Serialization error.
    #[error("Failed to serialize bean log data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::QuotaExceeded { .. } => {
                "Storage is full. Changes are kept for this session only.".to_string()
            }
            Self::Malformed { source } => {
                format!("Invalid file: the backup could not be parsed ({source}).")
            }
            Self::MissingKey { key } => {
                format!("Invalid file: the backup has no `{key}` list.")
            }
            Self::Schema { source } => {
                format!("Invalid file: {source}.")
            }
            Self::Invalid { violations } => {
                let mut message = String::from("Invalid file: the backup contains inconsistent data:");
                for violation in violations {
                    message.push_str("\n  - ");
                    message.push_str(&violation.to_string());
                }
                message
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the bean log data.".to_string()
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::QuotaExceeded { .. } => {
                Some("Export a backup and remove old beans to free space.".into())
            }
            Self::Malformed { .. } | Self::MissingKey { .. } | Self::Schema { .. } => {
                Some("Make sure you selected a backup file exported by beanlog.".into())
            }
            Self::Invalid { .. } => {
                Some("Fix the listed records in the backup file or export a fresh one.".into())
            }
            Self::Serialization { .. } => None,
        }
    }

    /// Whether this error came from reading a backup rather than from storage.
    pub fn is_rejected_import(&self) -> bool {
        matches!(
            self,
            Self::Malformed { .. } | Self::MissingKey { .. } | Self::Schema { .. } | Self::Invalid { .. }
        )
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_messages() {
        let error = PersistenceError::MissingKey { key: "shots" };
        assert_eq!(error.to_string(), "Backup is missing the `shots` collection");
        assert!(error.user_message().contains("`shots`"));
        assert!(error.suggestion().is_some());
        assert!(error.is_rejected_import());
    }

    #[test]
    fn test_quota_is_not_an_import_rejection() {
        let error = PersistenceError::QuotaExceeded {
            key: "slot".to_string(),
            size: 10,
            quota: 5,
        };
        assert!(!error.is_rejected_import());
        assert!(error.user_message().contains("this session only"));
    }
}
