//! # hdrfence-app
//!
//! Application use cases for hdrfence: loading the exception list and
//! scanning build-state files. This crate depends on `ports`, `domain`,
//! and `shared`; composition with concrete adapters happens in the CLI.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod deps;
pub mod load_rules;
pub mod scan;

pub use deps::ScanDeps;
pub use load_rules::load_rule_set;
pub use scan::{ScanInput, scan_state_file, scan_state_files};
