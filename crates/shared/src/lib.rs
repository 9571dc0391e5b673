//! # hdrfence-shared
//!
//! Shared result and error types for the hdrfence workspace.
//!
//! This crate provides foundational types used across all other crates:
//!
//! - Result alias and error envelope
//! - Stable error codes for the tool's failure taxonomy
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::errors::{ErrorCode, ErrorEnvelope, ErrorKind};

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::workspace_unset(), "unset");
        assert_eq!(error.kind, ErrorKind::Expected);
    }
}
