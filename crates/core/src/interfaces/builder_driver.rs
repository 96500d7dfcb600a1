//! Out-of-process invocation of the external builder

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    error::Result,
    interfaces::ProcessSink,
    job::JobMonitor,
    types::ProjectView,
};

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Per-invocation builder configuration.
///
/// A handle is built fresh for every request and owned by exactly one job;
/// it is intentionally not `Clone` so two invocations can never share
/// working-directory state.
#[derive(Debug)]
pub struct BuilderHandle {
    id: u64,
    home_dir: PathBuf,
    working_dir: PathBuf,
}

impl BuilderHandle {
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        let home_dir = home_dir.into();
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            working_dir: home_dir.clone(),
            home_dir,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.set_working_dir(dir);
        self
    }

    pub fn set_working_dir(&mut self, dir: impl Into<PathBuf>) {
        self.working_dir = dir.into();
    }

    /// Process-unique identity of this handle
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

/// The external build tool.
///
/// Implementations must be stateless with respect to invocations: everything
/// an invocation needs arrives through the [`BuilderHandle`]. Long operations
/// should consult `monitor` at their checkpoints and return
/// [`Error::Cancelled`](crate::Error::Cancelled) once it reports cancellation.
pub trait BuilderDriver: Send + Sync {
    /// Compute the project/task tree of `build_file`
    fn project_views(
        &self,
        handle: &BuilderHandle,
        build_file: &Path,
        monitor: &JobMonitor,
    ) -> Result<ProjectView>;

    /// Run `command_line`, streaming the transcript into `sink`; returns the exit code
    fn run(
        &self,
        handle: &BuilderHandle,
        command_line: &str,
        sink: &dyn ProcessSink,
        monitor: &JobMonitor,
    ) -> Result<i32>;
}
