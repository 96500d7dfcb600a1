//! Long-running units of work handed to the host job runtime
//!
//! Every variant runs the same skeleton: configure the driver, invoke it,
//! post-process its result. Variants differ only in the post-processing
//! step, which is where cache and classpath mutations happen. A job that is
//! cancelled, or whose driver invocation fails, never reaches that step.

pub mod configuration_build;
pub mod refresh_task;
pub mod update_classpath;

pub use configuration_build::ConfigurationBasedBuildJob;
pub use refresh_task::RefreshTaskJob;
pub use update_classpath::UpdateClasspathJob;

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::{
    error::{Error, Result},
    types::CacheKey,
};

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

impl JobId {
    fn next() -> Self {
        Self(NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Refresh,
    UpdateClasspath,
    RunBuild,
}

/// Scheduling priority, from most to least urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobPriority {
    Interactive,
    Short,
    Long,
    Build,
    Decorate,
}

/// Terminal outcome of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Ok,
    Error(String),
    Cancelled,
}

impl JobStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, JobStatus::Ok)
    }

    pub fn message(&self) -> &str {
        match self {
            JobStatus::Ok => "OK",
            JobStatus::Error(message) => message,
            JobStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Ok => write!(f, "OK"),
            JobStatus::Error(message) => write!(f, "ERROR: {message}"),
            JobStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// What a job is, as seen by the job runtime. Created once per request and
/// never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub kind: JobKind,
    pub name: String,
    pub key: CacheKey,
    pub priority: JobPriority,
    pub user_visible: bool,
    pub command_line: Option<String>,
    pub launch_name: Option<String>,
}

impl JobDescriptor {
    pub fn new(kind: JobKind, name: impl Into<String>, key: CacheKey) -> Self {
        Self {
            kind,
            name: name.into(),
            key,
            priority: JobPriority::Long,
            user_visible: false,
            command_line: None,
            launch_name: None,
        }
    }

    pub fn set_priority(&mut self, priority: JobPriority) {
        self.priority = priority;
    }

    pub fn set_user_visible(&mut self, user_visible: bool) {
        self.user_visible = user_visible;
    }
}

/// Cancellation flag shared between a running job and whoever holds its handle
#[derive(Debug, Clone, Default)]
pub struct JobMonitor {
    cancelled: Arc<AtomicBool>,
}

impl JobMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Error::Cancelled)` once cancellation has been requested
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
struct Completion {
    status: Mutex<Option<JobStatus>>,
    done: Condvar,
}

/// Handle to a scheduled job
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: JobId,
    descriptor: JobDescriptor,
    monitor: JobMonitor,
    completion: Arc<Completion>,
}

impl JobHandle {
    pub fn new(descriptor: JobDescriptor) -> Self {
        Self {
            id: JobId::next(),
            descriptor,
            monitor: JobMonitor::new(),
            completion: Arc::new(Completion::default()),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn descriptor(&self) -> &JobDescriptor {
        &self.descriptor
    }

    pub fn monitor(&self) -> &JobMonitor {
        &self.monitor
    }

    /// Request cancellation. Advisory until the driver starts, after which
    /// the driver is asked to terminate its child process.
    pub fn cancel(&self) {
        tracing::debug!("Cancellation requested for job {} ({})", self.id, self.descriptor.name);
        self.monitor.cancel();
    }

    /// Final status, or `None` while the job is pending or running
    pub fn status(&self) -> Option<JobStatus> {
        self.completion.status.lock().clone()
    }

    /// Record the final status; only the first call has an effect
    pub fn complete(&self, status: JobStatus) {
        let mut slot = self.completion.status.lock();
        if slot.is_none() {
            *slot = Some(status);
            self.completion.done.notify_all();
        }
    }

    /// Block until the job has finished
    pub fn join(&self) -> JobStatus {
        let mut slot = self.completion.status.lock();
        loop {
            if let Some(status) = slot.as_ref() {
                return status.clone();
            }
            self.completion.done.wait(&mut slot);
        }
    }

    pub fn join_timeout(&self, timeout: Duration) -> Option<JobStatus> {
        let mut slot = self.completion.status.lock();
        if slot.is_none() {
            self.completion.done.wait_for(&mut slot, timeout);
        }
        slot.clone()
    }
}

/// A unit of work the job runtime can execute
pub trait Job: Send {
    fn descriptor(&self) -> &JobDescriptor;

    fn run(&mut self, monitor: &JobMonitor) -> JobStatus;
}

/// The variant-specific parts of the shared job skeleton
pub trait JobBody: Send {
    type Output;

    fn descriptor(&self) -> &JobDescriptor;

    /// Invoke the builder driver
    fn invoke(&mut self, monitor: &JobMonitor) -> Result<Self::Output>;

    /// Apply a successful driver result
    fn post_process(&mut self, output: Self::Output) -> Result<()>;

    /// Runs last, whatever the outcome
    fn finish(&mut self, _status: &JobStatus) {}
}

impl<B: JobBody> Job for B {
    fn descriptor(&self) -> &JobDescriptor {
        JobBody::descriptor(self)
    }

    fn run(&mut self, monitor: &JobMonitor) -> JobStatus {
        let status = run_skeleton(self, monitor);
        self.finish(&status);
        status
    }
}

fn run_skeleton<B: JobBody>(body: &mut B, monitor: &JobMonitor) -> JobStatus {
    let name = JobBody::descriptor(body).name.clone();
    if monitor.is_cancelled() {
        tracing::debug!("{name}: cancelled before start");
        return JobStatus::Cancelled;
    }

    tracing::info!("{name}: started");
    let output = match body.invoke(monitor) {
        Ok(output) => output,
        Err(Error::Cancelled) => {
            tracing::info!("{name}: cancelled");
            return JobStatus::Cancelled;
        }
        Err(Error::Driver(diagnostic)) => {
            tracing::error!("{name}: builder failed: {diagnostic}");
            return JobStatus::Error(diagnostic);
        }
        Err(e) => {
            tracing::error!("{name}: {e}");
            return JobStatus::Error(e.to_string());
        }
    };

    // The driver may have finished before noticing a late cancellation
    if monitor.is_cancelled() {
        tracing::info!("{name}: cancelled, result discarded");
        return JobStatus::Cancelled;
    }

    match body.post_process(output) {
        Ok(()) => {
            tracing::info!("{name}: finished");
            JobStatus::Ok
        }
        Err(e) => {
            tracing::error!("{name}: {e}");
            JobStatus::Error(e.to_string())
        }
    }
}

/// Run `job` to completion and publish its status on `handle`.
///
/// A panic inside the job is reported as an internal error rather than
/// tearing down the runner.
pub fn execute(job: &mut dyn Job, handle: &JobHandle) -> JobStatus {
    let status = match panic::catch_unwind(AssertUnwindSafe(|| job.run(handle.monitor()))) {
        Ok(status) => status,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "job panicked".to_string());
            let error = Error::Internal(reason);
            tracing::error!("{}: {error}", handle.descriptor().name);
            JobStatus::Error(error.to_string())
        }
    };
    handle.complete(status.clone());
    status
}
