//! Filesystem boundary contract.

use hdrfence_shared::Result;

/// Boundary contract for filesystem access.
///
/// Paths cross this boundary as strings because the scanner's
/// containment checks are string-prefix tests over raw record tokens,
/// not segment-aware path comparisons.
pub trait FileSystemPort: Send + Sync {
    /// Read a UTF-8 text file in full.
    fn read_file_text(&self, path: &str) -> Result<String>;

    /// Canonicalize a path: resolve `.`, `..`, and symbolic links to an
    /// absolute real path.
    ///
    /// This never fails; components that do not exist are kept
    /// lexically (flagged headers need not exist on disk). Relative
    /// inputs are resolved against the implementation's working
    /// directory.
    fn realpath(&self, path: &str) -> String;
}
