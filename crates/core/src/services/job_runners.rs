//! Job runtimes

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::thread;

use crate::{
    interfaces::JobRunner,
    job::{self, Job, JobHandle, JobStatus},
};

/// Runs each job on its own named OS thread
#[derive(Debug, Default)]
pub struct ThreadJobRunner;

impl ThreadJobRunner {
    pub fn new() -> Self {
        Self
    }
}

impl JobRunner for ThreadJobRunner {
    fn schedule(&self, mut job: Box<dyn Job>) -> JobHandle {
        let handle = JobHandle::new(job.descriptor().clone());
        let descriptor = handle.descriptor();
        tracing::debug!(
            "Scheduling job {} '{}' (priority {:?}, user visible: {})",
            handle.id(),
            descriptor.name,
            descriptor.priority,
            descriptor.user_visible
        );

        let worker = handle.clone();
        let spawned = thread::Builder::new()
            .name(format!("job-{}", handle.id()))
            .spawn(move || {
                job::execute(job.as_mut(), &worker);
            });

        if let Err(e) = spawned {
            tracing::error!("Could not start job thread: {e}");
            handle.complete(JobStatus::Error(format!("Internal error: {e}")));
        }
        handle
    }
}

/// Queues jobs until the owner explicitly runs them on its own thread
#[derive(Default)]
pub struct DeferredJobRunner {
    queue: Mutex<VecDeque<(Box<dyn Job>, JobHandle)>>,
}

impl DeferredJobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn run_next(&self) -> Option<JobStatus> {
        // Release the queue before running so the job may schedule more work
        let (mut job, handle) = self.queue.lock().pop_front()?;
        Some(job::execute(job.as_mut(), &handle))
    }

    pub fn run_all(&self) -> Vec<JobStatus> {
        std::iter::from_fn(|| self.run_next()).collect()
    }
}

impl JobRunner for DeferredJobRunner {
    fn schedule(&self, job: Box<dyn Job>) -> JobHandle {
        let handle = JobHandle::new(job.descriptor().clone());
        self.queue.lock().push_back((job, handle.clone()));
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        job::{JobDescriptor, JobKind, JobMonitor},
        types::CacheKey,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting {
        descriptor: JobDescriptor,
        runs: Arc<AtomicUsize>,
    }

    impl Counting {
        fn boxed(runs: &Arc<AtomicUsize>) -> Box<dyn Job> {
            Box::new(Self {
                descriptor: JobDescriptor::new(JobKind::Refresh, "counting", CacheKey::from_path("/w/build.x")),
                runs: Arc::clone(runs),
            })
        }
    }

    impl Job for Counting {
        fn descriptor(&self) -> &JobDescriptor {
            &self.descriptor
        }

        fn run(&mut self, monitor: &JobMonitor) -> JobStatus {
            if monitor.is_cancelled() {
                return JobStatus::Cancelled;
            }
            self.runs.fetch_add(1, Ordering::SeqCst);
            JobStatus::Ok
        }
    }

    #[test]
    fn test_thread_runner_completes_handle() {
        let runs = Arc::new(AtomicUsize::new(0));
        let handle = ThreadJobRunner::new().schedule(Counting::boxed(&runs));
        assert_eq!(handle.join_timeout(Duration::from_secs(5)), Some(JobStatus::Ok));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deferred_runner_waits_for_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let runner = DeferredJobRunner::new();
        let first = runner.schedule(Counting::boxed(&runs));
        let second = runner.schedule(Counting::boxed(&runs));
        assert_eq!(runner.pending(), 2);
        assert!(first.status().is_none());

        second.cancel();
        assert_eq!(runner.run_all(), vec![JobStatus::Ok, JobStatus::Cancelled]);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(first.status(), Some(JobStatus::Ok));
        assert_eq!(runner.pending(), 0);
    }
}
