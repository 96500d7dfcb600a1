//! Path resolution interface
//!
//! Hosts expand their own placeholder syntax (workspace variables,
//! environment variables) before the scheduler ever touches the filesystem.

use crate::error::Result;
use std::path::PathBuf;

/// Trait for expanding user-supplied build-file paths
pub trait PathResolver: Send + Sync {
    /// Expand placeholders in `user_path` and return an absolute path.
    ///
    /// Fails with [`Error::Resolution`](crate::Error::Resolution) when a
    /// placeholder is unknown or the resulting file does not exist.
    fn resolve(&self, user_path: &str) -> Result<PathBuf>;
}
