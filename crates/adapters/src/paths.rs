//! Realpath resolution shared by the filesystem adapters.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Bound on symlink traversals per resolution; past it the remaining
/// components are appended unresolved instead of erroring.
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolve `.`, `..`, and symbolic links to an absolute path.
///
/// `read_link` returns the target of a symlink, or `None` for anything
/// that is not one (including paths that do not exist — those are kept
/// lexically). `..` pops the already-resolved prefix, so links are
/// resolved before parent traversal, matching realpath semantics.
pub(crate) fn resolve_realpath(
    path: &Path,
    cwd: &Path,
    read_link: &dyn Fn(&Path) -> Option<PathBuf>,
) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut pending = VecDeque::new();
    push_back_components(&mut pending, &absolute);

    let mut resolved = PathBuf::from("/");
    let mut hops = 0usize;

    while let Some(component) = pending.pop_front() {
        if component == "." {
            continue;
        }
        if component == ".." {
            resolved.pop();
            continue;
        }

        let candidate = resolved.join(&component);
        let Some(target) = read_link(&candidate) else {
            resolved = candidate;
            continue;
        };

        if hops >= MAX_SYMLINK_HOPS {
            resolved = candidate;
            continue;
        }
        hops += 1;

        if target.is_absolute() {
            resolved = PathBuf::from("/");
        }
        push_front_components(&mut pending, &target);
    }

    resolved
}

fn push_back_components(queue: &mut VecDeque<OsString>, path: &Path) {
    for component in path.components() {
        if let Some(part) = component_name(component) {
            queue.push_back(part);
        }
    }
}

fn push_front_components(queue: &mut VecDeque<OsString>, path: &Path) {
    let parts: Vec<OsString> = path
        .components()
        .filter_map(component_name)
        .collect();
    for part in parts.into_iter().rev() {
        queue.push_front(part);
    }
}

fn component_name(component: Component<'_>) -> Option<OsString> {
    match component {
        Component::RootDir | Component::Prefix(_) | Component::CurDir => None,
        Component::ParentDir => Some(OsString::from("..")),
        Component::Normal(part) => Some(part.to_os_string()),
    }
}
