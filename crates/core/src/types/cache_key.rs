use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Canonical absolute path of a build file, used to key the build-information cache.
///
/// Canonical form means: absolute (relative input is joined onto the current
/// directory), `.` and `..` components folded away, platform separators, and
/// case folded on platforms whose default filesystems are case-insensitive.
/// Symlinks are deliberately left unresolved so the key never depends on the
/// file existing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(PathBuf);

impl CacheKey {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };

        let normalized = normalize(&absolute);
        if cfg!(any(windows, target_os = "macos")) {
            Self(PathBuf::from(normalized.to_string_lossy().to_lowercase()))
        } else {
            Self(normalized)
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        Self::from_path(value)
    }
}

impl From<&Path> for CacheKey {
    fn from(value: &Path) -> Self {
        Self::from_path(value)
    }
}

/// Fold `.` and `..` components without touching the filesystem
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.iter().collect()
}
