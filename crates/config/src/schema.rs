//! Run configuration schema and validation.

use crate::env::{ENV_WORKSPACE, ENV_WORKSPACE_ALIAS, ScanEnv};
use hdrfence_shared::{ErrorCode, ErrorEnvelope, Result};
use serde::{Deserialize, Serialize};

/// Raw run configuration as collected from the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// Workspace root; falls back to the environment when unset.
    pub workspace: Option<String>,
    /// Exception-list file path.
    pub exception_file: String,
    /// Optional sysroot for header-pattern reinterpretation.
    pub sysroot: Option<String>,
    /// Build-state files to scan, in argument order.
    pub state_files: Vec<String>,
}

/// Validated run configuration with the workspace resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedScanConfig {
    /// Workspace root (non-empty).
    pub workspace: String,
    /// Exception-list file path.
    pub exception_file: String,
    /// Optional sysroot.
    pub sysroot: Option<String>,
    /// Build-state files to scan, in argument order.
    pub state_files: Vec<String>,
}

/// Resolve a raw configuration against the environment.
///
/// The CLI value wins over the environment; a workspace that is unset
/// or empty in both is a usage error.
pub fn resolve_config(config: ScanConfig, env: &ScanEnv) -> Result<ValidatedScanConfig> {
    let cli_workspace = config
        .workspace
        .filter(|workspace| !workspace.trim().is_empty());
    let workspace = cli_workspace.or_else(|| env.workspace.clone()).ok_or_else(|| {
        ErrorEnvelope::expected(
            ErrorCode::workspace_unset(),
            format!("-w not specified and {ENV_WORKSPACE}/{ENV_WORKSPACE_ALIAS} unset"),
        )
    })?;

    Ok(ValidatedScanConfig {
        workspace,
        exception_file: config.exception_file,
        sysroot: config.sysroot,
        state_files: config.state_files,
    })
}
