//! Classification of a path into directory, regular file, or neither.

use std::fs;
use std::path::Path;

/// What a path denotes on disk, as far as previewing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// An existing directory (symlinks are followed).
    Directory,
    /// An existing regular file (symlinks are followed).
    File,
    /// Missing, dangling, looping, or a special file.
    Invalid,
}

impl PathKind {
    pub fn is_directory(self) -> bool {
        self == PathKind::Directory
    }

    pub fn is_file(self) -> bool {
        self == PathKind::File
    }
}

/// Classifies `path` without side effects.
///
/// Any metadata error (not found, permission denied on a parent, a symlink
/// loop) yields [`PathKind::Invalid`].
pub fn classify(path: &Path) -> PathKind {
    if path.as_os_str().is_empty() {
        return PathKind::Invalid;
    }

    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => PathKind::Directory,
        Ok(meta) if meta.is_file() => PathKind::File,
        Ok(_) => PathKind::Invalid,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "path is not previewable");
            PathKind::Invalid
        }
    }
}
