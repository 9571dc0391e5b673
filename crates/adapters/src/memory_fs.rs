//! Deterministic in-memory filesystem double.
//!
//! Gives scanner and use-case tests exact control over file content,
//! symlink layout, and the working directory without touching disk.

use crate::paths::resolve_realpath;
use hdrfence_ports::FileSystemPort;
use hdrfence_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// In-memory filesystem with a fixed working directory.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    cwd: String,
    files: BTreeMap<String, String>,
    symlinks: BTreeMap<String, String>,
}

impl MemoryFileSystem {
    /// Build an empty filesystem rooted at the given working directory.
    #[must_use]
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            files: BTreeMap::new(),
            symlinks: BTreeMap::new(),
        }
    }

    /// Add a text file at an absolute path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add a symlink from `link` to `target`.
    #[must_use]
    pub fn with_symlink(mut self, link: impl Into<String>, target: impl Into<String>) -> Self {
        self.symlinks.insert(link.into(), target.into());
        self
    }
}

impl FileSystemPort for MemoryFileSystem {
    fn read_file_text(&self, path: &str) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            ErrorEnvelope::unexpected(
                ErrorCode::not_found(),
                format!("no such file: {path}"),
            )
            .with_metadata("path", path)
        })
    }

    fn realpath(&self, path: &str) -> String {
        let read_link = |candidate: &Path| -> Option<PathBuf> {
            self.symlinks
                .get(candidate.to_string_lossy().as_ref())
                .map(PathBuf::from)
        };
        resolve_realpath(Path::new(path), Path::new(&self.cwd), &read_link)
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_registered_files() {
        let fs = MemoryFileSystem::new("/ws").with_file("/ws/state", "a: b.h\n");
        assert_eq!(fs.read_file_text("/ws/state"), Ok("a: b.h\n".to_owned()));
    }

    #[test]
    fn missing_files_report_not_found() {
        let fs = MemoryFileSystem::new("/ws");
        let result = fs.read_file_text("/ws/absent");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, ErrorCode::not_found());
        }
    }

    #[test]
    fn realpath_uses_configured_cwd() {
        let fs = MemoryFileSystem::new("/ws/sub");
        assert_eq!(fs.realpath("c.h"), "/ws/sub/c.h");
        assert_eq!(fs.realpath("../b.h"), "/ws/b.h");
    }

    #[test]
    fn realpath_follows_registered_symlinks() {
        let fs = MemoryFileSystem::new("/ws").with_symlink("/ws/inc", "/opt/other/inc");
        assert_eq!(fs.realpath("/ws/inc/foo.h"), "/opt/other/inc/foo.h");
    }
}
