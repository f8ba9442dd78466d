//! Error types for travelrec.
//!
//! This module defines all error types used throughout the travelrec crate,
//! separating the two user-facing outcomes (a rejected field, a missing
//! record) from the I/O and configuration failures underneath them.

use std::path::PathBuf;
use thiserror::Error;

use crate::records::EntityKind;

/// The main error type for travelrec operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// A field value was rejected; nothing was written.
    #[error("invalid value for '{field}': {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Description of the problem.
        message: String,
    },

    /// No record matched the requested ID; nothing was written.
    #[error("{} not found: {id}", kind.title())]
    NotFound {
        /// Which collection was searched.
        kind: EntityKind,
        /// The ID as the caller supplied it.
        id: String,
    },

    // === Agent Errors ===
    /// Agent login failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    // === Storage Errors ===
    /// Failed to read a collection file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a collection file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A collection file does not hold a valid JSON array of records.
    #[error("malformed JSON in {path}: {source}")]
    JsonParse {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal limit was hit, such as running out of record IDs.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for travelrec operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the named field.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error for the given collection and ID.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means no record matched.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a rejected field value.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = Error::validation("Name", "is required");
        assert_eq!(err.to_string(), "invalid value for 'Name': is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found(EntityKind::Client, "42");
        assert_eq!(err.to_string(), "Client not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_not_found_uses_entity_title() {
        let err = Error::not_found(EntityKind::AvailableFlight, "a");
        assert_eq!(err.to_string(), "Available flight not found: a");

        let err = Error::not_found(EntityKind::Booking, "7");
        assert_eq!(err.to_string(), "Flight booking not found: 7");
    }

    #[test]
    fn test_invalid_credentials_display() {
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "invalid credentials"
        );
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_json_parse_error_display() {
        let source = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        let err = Error::JsonParse {
            path: PathBuf::from("/data/clients.json"),
            source,
        };
        assert!(err.to_string().contains("/data/clients.json"));
    }

    #[test]
    fn test_file_write_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::FileWrite {
            path: PathBuf::from("/root/airlines.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/airlines.json"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "id_width must be between 1 and 20".to_string(),
        };
        assert!(err.to_string().contains("id_width"));
    }
}
