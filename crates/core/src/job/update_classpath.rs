use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    error::Result,
    interfaces::{BuilderDriver, BuilderHandle, ClasspathProject},
    job::{JobBody, JobDescriptor, JobKind, JobMonitor},
    types::{CacheKey, ProjectView},
};

/// Runs the builder and replaces the project's classpath from the result
pub struct UpdateClasspathJob {
    descriptor: JobDescriptor,
    handle: BuilderHandle,
    driver: Arc<dyn BuilderDriver>,
    build_file: PathBuf,
    project: Arc<dyn ClasspathProject>,
}

impl UpdateClasspathJob {
    pub fn new(
        project: Arc<dyn ClasspathProject>,
        handle: BuilderHandle,
        driver: Arc<dyn BuilderDriver>,
        build_file: PathBuf,
    ) -> Self {
        let descriptor = JobDescriptor::new(
            JobKind::UpdateClasspath,
            format!("Updating classpath of {}", project.name()),
            CacheKey::from_path(&build_file),
        );
        Self {
            descriptor,
            handle,
            driver,
            build_file,
            project,
        }
    }

    pub fn descriptor_mut(&mut self) -> &mut JobDescriptor {
        &mut self.descriptor
    }
}

impl JobBody for UpdateClasspathJob {
    type Output = ProjectView;

    fn descriptor(&self) -> &JobDescriptor {
        &self.descriptor
    }

    fn invoke(&mut self, monitor: &JobMonitor) -> Result<ProjectView> {
        self.driver
            .project_views(&self.handle, &self.build_file, monitor)
    }

    fn post_process(&mut self, view: ProjectView) -> Result<()> {
        let entries = view.classpath_entries();
        tracing::info!(
            "Replacing classpath of {} with {} entries",
            self.project.name(),
            entries.len()
        );
        self.project.replace_classpath(entries)
    }
}
