//! Background-job runtime interface

use crate::job::{Job, JobHandle};

/// Host facility that runs long jobs off the UI thread.
///
/// Priority and visibility travel with the job's
/// [`JobDescriptor`](crate::job::JobDescriptor); cancellation goes through
/// the returned [`JobHandle`].
pub trait JobRunner: Send + Sync {
    fn schedule(&self, job: Box<dyn Job>) -> JobHandle;
}
