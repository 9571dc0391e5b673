//! Environment lookup for configuration defaults.
//!
//! Core logic never reads the process environment directly: `ScanEnv`
//! is populated through an injected provider function, keeping the
//! scanner environment-agnostic and unit-testable.

/// Env var: workspace root default.
pub const ENV_WORKSPACE: &str = "HDRFENCE_WORKSPACE";
/// Env var: workspace root default (alias).
pub const ENV_WORKSPACE_ALIAS: &str = "CODEMGR_WS";

/// Environment-sourced configuration defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanEnv {
    /// Workspace root from the environment, when set and non-empty.
    pub workspace: Option<String>,
}

impl ScanEnv {
    /// Build from an injected lookup function.
    ///
    /// The primary variable wins over the alias; values that are empty
    /// after trimming count as unset.
    pub fn from_provider<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let workspace =
            non_empty(lookup(ENV_WORKSPACE)).or_else(|| non_empty(lookup(ENV_WORKSPACE_ALIAS)));
        Self { workspace }
    }

    /// Build from the process environment (composition root only).
    #[must_use]
    pub fn from_std_env() -> Self {
        Self::from_provider(|key| std::env::var(key).ok())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
