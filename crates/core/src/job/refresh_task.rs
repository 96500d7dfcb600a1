use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    cache::BuildInformationCache,
    error::Result,
    interfaces::{BuilderDriver, BuilderHandle},
    job::{JobBody, JobDescriptor, JobKind, JobMonitor, JobStatus},
    types::{CacheKey, ProjectView},
};

/// Recomputes the project/task tree of one build file and stores it in the cache
pub struct RefreshTaskJob {
    descriptor: JobDescriptor,
    handle: BuilderHandle,
    driver: Arc<dyn BuilderDriver>,
    build_file: PathBuf,
    cache: Arc<BuildInformationCache>,
}

impl RefreshTaskJob {
    pub fn new(
        handle: BuilderHandle,
        driver: Arc<dyn BuilderDriver>,
        build_file: PathBuf,
        cache: Arc<BuildInformationCache>,
    ) -> Self {
        let descriptor = JobDescriptor::new(
            JobKind::Refresh,
            format!("Refreshing tasks of {}", build_file.display()),
            CacheKey::from_path(&build_file),
        );
        Self {
            descriptor,
            handle,
            driver,
            build_file,
            cache,
        }
    }

    pub fn descriptor_mut(&mut self) -> &mut JobDescriptor {
        &mut self.descriptor
    }

    /// Run the refresh on the calling thread
    pub fn calculate_tasks(&mut self, monitor: &JobMonitor) -> JobStatus {
        crate::job::Job::run(self, monitor)
    }
}

impl JobBody for RefreshTaskJob {
    type Output = ProjectView;

    fn descriptor(&self) -> &JobDescriptor {
        &self.descriptor
    }

    fn invoke(&mut self, monitor: &JobMonitor) -> Result<ProjectView> {
        self.driver
            .project_views(&self.handle, &self.build_file, monitor)
    }

    fn post_process(&mut self, view: ProjectView) -> Result<()> {
        tracing::debug!(
            "Caching {} tasks for {}",
            view.task_count(),
            self.build_file.display()
        );
        self.cache.put(self.descriptor.key.clone(), view);
        Ok(())
    }
}
