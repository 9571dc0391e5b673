//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ErrorEnvelope};

    #[test]
    fn result_defaults_to_envelope_error() {
        let ok: Result<i32> = Ok(1);
        assert!(matches!(ok, Ok(1)));

        let err: Result<i32> =
            Err(ErrorEnvelope::expected(ErrorCode::malformed_line(), "bad"));
        assert!(err.is_err());
    }
}
