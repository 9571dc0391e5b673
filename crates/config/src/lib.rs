//! # hdrfence-config
//!
//! Run configuration schema and environment resolution for hdrfence.
//!
//! The workspace root may come from the CLI or from the environment
//! (`HDRFENCE_WORKSPACE`, alias `CODEMGR_WS`); everything else is
//! CLI-only. Environment access goes through an injected provider so
//! resolution stays deterministic under test.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod env;
pub mod schema;

pub use env::{ENV_WORKSPACE, ENV_WORKSPACE_ALIAS, ScanEnv};
pub use schema::{ScanConfig, ValidatedScanConfig, resolve_config};
