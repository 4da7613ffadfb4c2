//! Error handling for layer stacks
//!
//! Every failure surfaces to the immediate caller. Nothing is retried
//! internally; retrying is the caller's job and only makes sense at the
//! I/O boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for layer stack operations
pub type Result<T> = std::result::Result<T, StackError>;

/// Main error type for layer stack operations
#[derive(Error, Debug)]
pub enum StackError {
    // Access Errors
    #[error("Layer index {index} out of range (stack has {num_layers} layers)")]
    IndexOutOfRange { index: usize, num_layers: usize },

    #[error("Layer {index} is a '{actual}', not a '{expected}'")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        actual: String,
    },

    // Format Errors
    #[error("Unsupported stack format version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Document holds a '{found}', expected a '{expected}'")]
    StackTypeMismatch { found: String, expected: String },

    #[error("Unknown layer type: {type_name}")]
    UnknownLayerType { type_name: String },

    #[error("Malformed '{type_name}' layer: {reason}")]
    MalformedLayer { type_name: String, reason: String },

    // Construction Errors
    #[error("Invalid layer: {reason}")]
    InvalidLayer { reason: String },

    #[error("Invalid coordinate '{text}': expected <layer>:<element>")]
    InvalidCoordinate { text: String },

    #[error("Cursor is exhausted")]
    CursorExhausted,

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StackError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            StackError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            StackError::TypeMismatch { .. } => "TYPE_MISMATCH",
            StackError::VersionMismatch { .. } => "VERSION_MISMATCH",
            StackError::StackTypeMismatch { .. } => "STACK_TYPE_MISMATCH",
            StackError::UnknownLayerType { .. } => "UNKNOWN_LAYER_TYPE",
            StackError::MalformedLayer { .. } => "MALFORMED_LAYER",
            StackError::InvalidLayer { .. } => "INVALID_LAYER",
            StackError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            StackError::CursorExhausted => "CURSOR_EXHAUSTED",
            StackError::FileNotFound { .. } => "FILE_NOT_FOUND",
            StackError::Io(_) => "IO_ERROR",
            StackError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true if the operation may succeed when retried.
    ///
    /// Only failures at the I/O boundary qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StackError::Io(_) | StackError::FileNotFound { .. })
    }

    /// Returns true if the error means a persisted document was rejected
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            StackError::VersionMismatch { .. }
                | StackError::StackTypeMismatch { .. }
                | StackError::UnknownLayerType { .. }
                | StackError::MalformedLayer { .. }
                | StackError::Serialization(_)
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StackError::IndexOutOfRange { .. } => {
                Some("Check the layer index against the stack's layer count.")
            }
            StackError::TypeMismatch { .. } => {
                Some("Request the layer as the type it was added with, or use the untyped view.")
            }
            StackError::VersionMismatch { .. } => {
                Some("Re-export the stack with a build that writes the current format version.")
            }
            StackError::UnknownLayerType { .. } => {
                Some("Register the layer type with the LayerRegistry before loading.")
            }
            StackError::FileNotFound { .. } => Some("Check the file path and try again."),
            StackError::InvalidCoordinate { .. } => {
                Some("Write coordinates as <layer>:<element>, e.g. 0:3.")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StackError::IndexOutOfRange {
            index: 4,
            num_layers: 2,
        };
        assert_eq!(err.error_code(), "INDEX_OUT_OF_RANGE");
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_version_mismatch_is_malformed() {
        let err = StackError::VersionMismatch {
            found: 2,
            expected: 1,
        };
        assert!(err.is_malformed_data());
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Unsupported stack format version 2 (expected 1)"
        );
    }

    #[test]
    fn test_io_is_retryable() {
        let err = StackError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
