use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    interfaces::{BuilderDriver, BuilderHandle, ProcessSink},
    job::{JobBody, JobDescriptor, JobKind, JobMonitor, JobStatus},
    types::{CacheKey, LaunchConfiguration},
};

/// Runs a user launch of the builder and streams its transcript to a process sink
pub struct ConfigurationBasedBuildJob {
    descriptor: JobDescriptor,
    handle: BuilderHandle,
    driver: Arc<dyn BuilderDriver>,
    command_line: String,
    sink: Arc<dyn ProcessSink>,
}

impl ConfigurationBasedBuildJob {
    pub fn new(
        handle: BuilderHandle,
        driver: Arc<dyn BuilderDriver>,
        sink: Arc<dyn ProcessSink>,
        configuration: &LaunchConfiguration,
        build_file: PathBuf,
        command_line: String,
    ) -> Self {
        let mut descriptor = JobDescriptor::new(
            JobKind::RunBuild,
            format!("Running {}", configuration.name),
            CacheKey::from_path(&build_file),
        );
        descriptor.command_line = Some(command_line.clone());
        descriptor.launch_name = Some(configuration.name.clone());
        Self {
            descriptor,
            handle,
            driver,
            command_line,
            sink,
        }
    }

    pub fn descriptor_mut(&mut self) -> &mut JobDescriptor {
        &mut self.descriptor
    }
}

impl JobBody for ConfigurationBasedBuildJob {
    type Output = i32;

    fn descriptor(&self) -> &JobDescriptor {
        &self.descriptor
    }

    fn invoke(&mut self, monitor: &JobMonitor) -> Result<i32> {
        tracing::debug!(
            "Invoking builder in {} with: {}",
            self.handle.working_dir().display(),
            self.command_line
        );
        self.driver
            .run(&self.handle, &self.command_line, self.sink.as_ref(), monitor)
    }

    fn post_process(&mut self, exit_code: i32) -> Result<()> {
        self.sink.set_exit_code(exit_code);
        if exit_code == 0 {
            Ok(())
        } else {
            Err(Error::Driver(format!("Build exited with code {exit_code}")))
        }
    }

    fn finish(&mut self, _status: &JobStatus) {
        self.sink.mark_complete();
    }
}
