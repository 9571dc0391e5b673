//! Shared dependencies for the use cases.

use hdrfence_ports::{FileSystemPort, LoggerPort};
use std::sync::Arc;

/// Dependencies required by rule loading and scanning.
#[derive(Clone)]
pub struct ScanDeps {
    /// Filesystem access (reads + canonicalization).
    pub fs: Arc<dyn FileSystemPort>,
    /// Optional structured logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

impl ScanDeps {
    /// Build deps with logging disabled.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystemPort>) -> Self {
        Self { fs, logger: None }
    }

    /// Attach a logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LoggerPort>) -> Self {
        self.logger = Some(logger);
        self
    }
}
