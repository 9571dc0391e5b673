//! Local filesystem adapter.

use crate::paths::resolve_realpath;
use hdrfence_ports::FileSystemPort;
use hdrfence_shared::{ErrorEnvelope, Result};
use std::path::{Path, PathBuf};

/// Filesystem adapter backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Build a local filesystem adapter.
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystemPort for LocalFileSystem {
    fn read_file_text(&self, path: &str) -> Result<String> {
        std::fs::read_to_string(path)
            .map_err(|error| ErrorEnvelope::from(error).with_metadata("path", path))
    }

    fn realpath(&self, path: &str) -> String {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        resolve_realpath(Path::new(path), &cwd, &read_link_if_symlink)
            .to_string_lossy()
            .into_owned()
    }
}

fn read_link_if_symlink(path: &Path) -> Option<PathBuf> {
    let metadata = std::fs::symlink_metadata(path).ok()?;
    if !metadata.file_type().is_symlink() {
        return None;
    }
    std::fs::read_link(path).ok()
}
