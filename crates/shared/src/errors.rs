//! Error envelope types and helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fmt, io};

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Expected failures (bad arguments, malformed input files).
    Expected,
    /// Unexpected failures (I/O, environment).
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Workspace root missing from both CLI and environment.
    pub fn workspace_unset() -> Self {
        Self::new("config", "workspace_unset")
    }

    /// Exception-list line with the wrong token count.
    pub fn malformed_line() -> Self {
        Self::new("rules", "malformed_line")
    }

    /// Exception-list line with an unrecognized rule keyword.
    pub fn unknown_keyword() -> Self {
        Self::new("rules", "unknown_keyword")
    }

    /// Target-ignore rule that does not split into `dir:glob`.
    pub fn malformed_target_rule() -> Self {
        Self::new("rules", "malformed_target_rule")
    }

    /// File not found.
    pub fn not_found() -> Self {
        Self::new("io", "not_found")
    }

    /// Permission denied.
    pub fn permission_denied() -> Self {
        Self::new("io", "permission_denied")
    }

    /// Other I/O failure.
    pub fn io() -> Self {
        Self::new("io", "read_failed")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error envelope shared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Expected,
            code,
            message: message.into(),
            metadata: ErrorMetadata::new(),
        }
    }

    /// Create an unexpected error.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            code,
            message: message.into(),
            metadata: ErrorMetadata::new(),
        }
    }

    /// Attach a metadata key/value pair.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns true when the code lives in the given namespace.
    #[must_use]
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.code.namespace() == namespace
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorEnvelope {}

impl From<io::Error> for ErrorEnvelope {
    fn from(error: io::Error) -> Self {
        let code = match error.kind() {
            io::ErrorKind::NotFound => ErrorCode::not_found(),
            io::ErrorKind::PermissionDenied => ErrorCode::permission_denied(),
            _ => ErrorCode::io(),
        };
        Self::unexpected(code, error.to_string())
    }
}
