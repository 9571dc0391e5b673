//! Findings and their ordering contract.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One reported out-of-workspace header reference.
///
/// `header_path` is absolute and canonicalized; `target` is the raw
/// left-hand side of the originating record (multiple space-separated
/// targets stay one key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Directory component of the state file the record came from.
    pub directory: String,
    /// Raw target key of the record.
    pub target: String,
    /// Absolute, canonicalized header path.
    pub header_path: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: {}: {}",
            self.directory, self.target, self.header_path
        )
    }
}

/// Deterministic ordering contract:
/// 1) directory (asc)
/// 2) target (asc)
/// 3) headerPath (asc)
#[must_use]
pub fn compare_findings(a: &Finding, b: &Finding) -> Ordering {
    let directory_order = a.directory.cmp(&b.directory);
    if directory_order != Ordering::Equal {
        return directory_order;
    }

    let target_order = a.target.cmp(&b.target);
    if target_order != Ordering::Equal {
        return target_order;
    }

    a.header_path.cmp(&b.header_path)
}
