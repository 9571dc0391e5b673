//! # hdrfence-domain
//!
//! Exception-rule model, matching engine, and findings for hdrfence.
//!
//! This crate contains the core domain model with no infrastructure
//! dependencies:
//!
//! - **Rules** - `Rule`, `RuleSet` (parse/index/query)
//! - **Findings** - `Finding` and its ordering contract
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate (plus the glob engine)
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use hdrfence_shared::shared_crate_version;

pub mod findings;
pub mod rules;

pub use findings::{Finding, compare_findings};
pub use rules::{
    KEYWORD_IGNORE_DIR, KEYWORD_IGNORE_HEADER, KEYWORD_IGNORE_TARGET, Rule, RuleSet,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        let version = domain_crate_version();
        assert!(!version.is_empty());
    }
}
