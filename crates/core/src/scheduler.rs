//! The scheduler: entry point for every request against the builder
//!
//! It decides whether work runs on the caller's thread or as a background
//! job, builds a fresh [`BuilderHandle`] for every request, and routes
//! user-facing failures to the display dispatcher. Hosts construct one
//! [`ExecScheduler`] and either pass it around or [`install`] it behind the
//! process-wide accessor.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::{
    cache::BuildInformationCache,
    command::append_build_file,
    error::{Error, Result},
    home::BuilderHomeResolver,
    interfaces::{
        BuilderDriver, BuilderHandle, ClasspathProject, DisplayDispatcher, JobRunner, PathResolver,
        PreferenceSource, ProcessSink,
    },
    job::{
        self, ConfigurationBasedBuildJob, JobHandle, JobPriority, JobStatus, RefreshTaskJob,
        UpdateClasspathJob,
    },
    types::{CacheKey, LaunchConfiguration, ProjectView},
};

/// Title of the dialog raised when a synchronous refresh fails
pub const REFRESH_ERROR_TITLE: &str = "Error while calculating tasks";

/// Everything the host supplies to the scheduler
pub struct Collaborators {
    pub driver: Arc<dyn BuilderDriver>,
    pub runner: Arc<dyn JobRunner>,
    pub display: Arc<dyn DisplayDispatcher>,
    pub resolver: Arc<dyn PathResolver>,
    pub preferences: Arc<dyn PreferenceSource>,
    pub homes: BuilderHomeResolver,
}

/// What a call to [`ExecScheduler::refresh_task_view`] did
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The path was empty or its directory is missing; nothing happened
    Skipped,
    /// A background job was handed to the job runner
    Scheduled(JobHandle),
    /// The refresh ran on the calling thread
    Completed(JobStatus),
}

impl RefreshOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RefreshOutcome::Skipped)
    }
}

pub struct ExecScheduler {
    cache: Arc<BuildInformationCache>,
    driver: Arc<dyn BuilderDriver>,
    runner: Arc<dyn JobRunner>,
    display: Arc<dyn DisplayDispatcher>,
    resolver: Arc<dyn PathResolver>,
    preferences: Arc<dyn PreferenceSource>,
    homes: BuilderHomeResolver,
}

impl ExecScheduler {
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            driver,
            runner,
            display,
            resolver,
            preferences,
            homes,
        } = collaborators;

        Self {
            cache: Arc::new(BuildInformationCache::new()),
            driver,
            runner,
            display,
            resolver,
            preferences,
            homes,
        }
    }

    pub fn cache(&self) -> &Arc<BuildInformationCache> {
        &self.cache
    }

    pub fn homes(&self) -> &BuilderHomeResolver {
        &self.homes
    }

    /// Builder home according to the workspace preferences
    pub fn builder_home(&self) -> Result<PathBuf> {
        self.homes.resolve(self.preferences.as_ref(), self.display.as_ref())
    }

    /// Project view of `build_file`, computed on the calling thread when it
    /// is not cached yet.
    ///
    /// A failed computation has already been reported through the display
    /// dispatcher; the cache content (possibly nothing) is returned either way.
    pub fn views_for(&self, build_file: &str) -> Option<Arc<ProjectView>> {
        let key = CacheKey::from_path(build_file);
        if let Some(view) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {key}");
            return Some(view);
        }

        tracing::debug!("Cache miss for {key}, refreshing synchronously");
        self.refresh_task_view(build_file, true);
        self.cache.get(&key)
    }

    /// Recompute the project view of `build_file`.
    ///
    /// An empty path or one whose directory does not exist is ignored, since
    /// the user may still be typing it.
    pub fn refresh_task_view(&self, build_file: &str, synchronous: bool) -> RefreshOutcome {
        if build_file.trim().is_empty() {
            return RefreshOutcome::Skipped;
        }

        let path = Path::new(build_file);
        if !path.parent().is_some_and(Path::is_dir) {
            tracing::warn!("Not refreshing {build_file}: parent directory does not exist");
            return RefreshOutcome::Skipped;
        }

        let handle = match self.builder_home() {
            Ok(home) => fresh_handle(home, path),
            Err(e) => {
                tracing::error!("Cannot refresh {build_file}: {e}");
                self.display.post_error(REFRESH_ERROR_TITLE, &e.to_string());
                return RefreshOutcome::Completed(JobStatus::Error(e.to_string()));
            }
        };

        let mut refresh = RefreshTaskJob::new(
            handle,
            Arc::clone(&self.driver),
            path.to_path_buf(),
            Arc::clone(&self.cache),
        );
        if synchronous {
            let job_handle = JobHandle::new(refresh.descriptor_mut().clone());
            let status = job::execute(&mut refresh, &job_handle);
            if let JobStatus::Error(message) = &status {
                self.display.post_error(REFRESH_ERROR_TITLE, message);
            }
            return RefreshOutcome::Completed(status);
        }

        let descriptor = refresh.descriptor_mut();
        descriptor.set_priority(JobPriority::Long);
        descriptor.set_user_visible(false);
        RefreshOutcome::Scheduled(self.runner.schedule(Box::new(refresh)))
    }

    /// Schedule a classpath update of `project` from the build file at
    /// `build_path`, which may contain placeholders
    pub fn update_classpath(&self, build_path: &str, project: Arc<dyn ClasspathProject>) -> Result<JobHandle> {
        self.update_classpath_with(self.preferences.as_ref(), build_path, project)
    }

    /// Like [`update_classpath`](Self::update_classpath), taking the builder
    /// home from `preferences` instead of the workspace preferences
    pub fn update_classpath_with(
        &self,
        preferences: &dyn PreferenceSource,
        build_path: &str,
        project: Arc<dyn ClasspathProject>,
    ) -> Result<JobHandle> {
        let build_file = self.resolver.resolve(build_path)?;
        let home = self.homes.resolve(preferences, self.display.as_ref())?;
        let handle = fresh_handle(home, &build_file);

        let mut update = UpdateClasspathJob::new(project, handle, Arc::clone(&self.driver), build_file);
        let descriptor = update.descriptor_mut();
        descriptor.set_priority(JobPriority::Long);
        descriptor.set_user_visible(true);
        Ok(self.runner.schedule(Box::new(update)))
    }

    /// Schedule the launch described by `configuration`.
    ///
    /// `-b <file>` is appended to `command_line` so the builder reads the
    /// configured build file whatever its name, and the builder runs in the
    /// directory holding that file.
    pub fn run_build(
        &self,
        configuration: &LaunchConfiguration,
        command_line: &str,
        sink: Arc<dyn ProcessSink>,
    ) -> Result<JobHandle> {
        let build_file = self.resolver.resolve(configuration.location())?;
        let file_name = build_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::resolution(configuration.location(), "not a file"))?;
        let command_line = append_build_file(command_line, &file_name);

        let home = self.builder_home()?;
        let handle = fresh_handle(home, &build_file);

        let mut build = ConfigurationBasedBuildJob::new(
            handle,
            Arc::clone(&self.driver),
            sink,
            configuration,
            build_file,
            command_line,
        );
        let descriptor = build.descriptor_mut();
        descriptor.set_priority(JobPriority::Long);
        descriptor.set_user_visible(true);
        Ok(self.runner.schedule(Box::new(build)))
    }
}

/// A handle owned by exactly one job, working in the build file's directory
fn fresh_handle(home: PathBuf, build_file: &Path) -> BuilderHandle {
    let handle = BuilderHandle::new(home);
    match build_file.parent() {
        Some(dir) => handle.with_working_dir(dir),
        None => handle,
    }
}

static INSTANCE: OnceLock<ExecScheduler> = OnceLock::new();

/// Make `scheduler` the process-wide instance returned by [`instance`]
pub fn install(scheduler: ExecScheduler) -> Result<&'static ExecScheduler> {
    INSTANCE
        .set(scheduler)
        .map_err(|_| Error::Internal("scheduler already installed".to_string()))?;
    instance()
}

/// The process-wide scheduler, once a host has installed one
pub fn instance() -> Result<&'static ExecScheduler> {
    INSTANCE.get().ok_or(Error::NotInitialized)
}
