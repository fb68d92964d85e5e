//! Error types for flatpath.
//!
//! All errors in flatpath are strongly typed using thiserror.
//! This enables pattern matching on specific error conditions
//! and provides clear error messages.

use thiserror::Error;

use crate::node::{ContainerKind, NodeKind};

/// Errors raised by [`PathEngine::write`](crate::PathEngine::write).
///
/// `read` and `enumerate` never fail; a path that does not resolve is
/// reported as [`Lookup::NotFound`](crate::Lookup::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A segment needs a container of one kind where a value of another kind
    /// already lives. The existing value is left untouched.
    #[error("Cannot write through '{prefix}': expected {expected}, found {found}")]
    StructuralConflict {
        /// Path prefix naming the conflicting location (empty for the root).
        prefix: String,
        /// Container kind the path requires at `prefix`.
        expected: ContainerKind,
        /// Kind of the value already stored at `prefix`.
        found: NodeKind,
    },

    #[error("Path is empty")]
    EmptyPath,

    #[error("Malformed path '{path}' at offset {offset}: {reason}")]
    Malformed {
        path: String,
        offset: usize,
        reason: &'static str,
    },

    #[error("Array index {index} at '{prefix}' exceeds the maximum of {max}")]
    IndexLimitExceeded {
        prefix: String,
        index: usize,
        max: usize,
    },
}

impl PathError {
    pub(crate) fn malformed(path: &str, offset: usize, reason: &'static str) -> Self {
        Self::Malformed {
            path: path.to_string(),
            offset,
            reason,
        }
    }

    /// Returns true if this is a structural type conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::StructuralConflict { .. })
    }
}

/// Errors in an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Config field '{field}' is invalid: {reason}")]
    InvalidField {
        field: String,
        reason: String,
    },
}

/// Top-level error type for flatpath.
#[derive(Debug, Error)]
pub enum FlatpathError {
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlatpathError {
    /// Returns true if this is a path error.
    #[must_use]
    pub const fn is_path(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a JSON (de)serialization error.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Returns true if this error is retryable.
    ///
    /// Every flatpath operation is a pure function of its inputs, so repeating
    /// a failed call fails the same way.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for flatpath operations.
pub type FlatpathResult<T> = Result<T, FlatpathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_conflict_message() {
        let err = PathError::StructuralConflict {
            prefix: "foo".to_string(),
            expected: ContainerKind::Array,
            found: NodeKind::String,
        };
        let msg = format!("{err}");
        assert!(msg.contains("'foo'"));
        assert!(msg.contains("expected array"));
        assert!(msg.contains("found string"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_malformed_message() {
        let err = PathError::malformed("a[x]", 2, "array index must be a non-negative integer");
        let msg = format!("{err}");
        assert!(msg.contains("a[x]"));
        assert!(msg.contains("offset 2"));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_index_limit_message() {
        let err = PathError::IndexLimitExceeded {
            prefix: "items".to_string(),
            index: 5000,
            max: 10,
        };
        let msg = format!("{err}");
        assert!(msg.contains("5000"));
        assert!(msg.contains("items"));
    }

    #[test]
    fn test_flatpath_error_from_path() {
        let err: FlatpathError = PathError::EmptyPath.into();
        assert!(err.is_path());
        assert!(!err.is_config());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_flatpath_error_from_config() {
        let err: FlatpathError = ConfigError::InvalidField {
            field: "max_array_index".to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .into();
        assert!(err.is_config());
        assert!(format!("{err}").contains("max_array_index"));
    }

    #[test]
    fn test_flatpath_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FlatpathError = json_err.into();
        assert!(err.is_json());
        assert!(!err.is_retryable());
    }
}
