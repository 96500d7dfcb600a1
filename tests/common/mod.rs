//! Shared fakes for the end-to-end scenarios

#![allow(dead_code)]

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use taskbridge_core::{
    BuilderHomeResolver, ClasspathEntry, ClasspathKind, Collaborators, Error, ExecScheduler,
    ProjectView, Result,
    interfaces::{
        Bundle, BundleRegistry, BundleVersion, BuilderDriver, BuilderHandle, ClasspathProject,
        ExportedPackage, ProcessSink,
    },
    job::JobMonitor,
    services::{DeferredJobRunner, ImmediateDispatcher, RecordingShell, SettingsPreferences, VariablePathResolver},
};

/// One driver invocation as the driver saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub handle_id: u64,
    pub home_dir: PathBuf,
    pub working_dir: PathBuf,
    pub build_file: Option<PathBuf>,
    pub command_line: Option<String>,
}

/// Driver returning a fixed view and recording every call
#[derive(Default)]
pub struct RecordingDriver {
    pub failure: Mutex<Option<String>>,
    pub invocations: Mutex<Vec<Invocation>>,
}

impl RecordingDriver {
    pub fn failing(diagnostic: &str) -> Self {
        let driver = Self::default();
        *driver.failure.lock() = Some(diagnostic.to_string());
        driver
    }

    pub fn view_calls(&self) -> usize {
        self.invocations.lock().iter().filter(|i| i.build_file.is_some()).count()
    }

    pub fn runs(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .iter()
            .filter(|i| i.command_line.is_some())
            .cloned()
            .collect()
    }

    fn record(&self, handle: &BuilderHandle, build_file: Option<&Path>, command_line: Option<&str>) {
        self.invocations.lock().push(Invocation {
            handle_id: handle.id(),
            home_dir: handle.home_dir().to_path_buf(),
            working_dir: handle.working_dir().to_path_buf(),
            build_file: build_file.map(Path::to_path_buf),
            command_line: command_line.map(str::to_string),
        });
    }
}

impl BuilderDriver for RecordingDriver {
    fn project_views(&self, handle: &BuilderHandle, build_file: &Path, monitor: &JobMonitor) -> Result<ProjectView> {
        monitor.checkpoint()?;
        self.record(handle, Some(build_file), None);
        if let Some(diagnostic) = self.failure.lock().clone() {
            return Err(Error::Driver(diagnostic));
        }
        Ok(ProjectView::new("proj")
            .with_task("build", Some("Assembles the project"))
            .with_classpath_entry(ClasspathKind::Library, "/repo/lib.jar"))
    }

    fn run(&self, handle: &BuilderHandle, command_line: &str, sink: &dyn ProcessSink, monitor: &JobMonitor) -> Result<i32> {
        monitor.checkpoint()?;
        self.record(handle, None, Some(command_line));
        sink.append_output(&format!("ran {command_line}\n"));
        Ok(0)
    }
}

/// Project that keeps its classpath in memory
#[derive(Default)]
pub struct RecordingProject {
    pub entries: Mutex<Vec<ClasspathEntry>>,
    pub replacements: Mutex<usize>,
}

impl ClasspathProject for RecordingProject {
    fn name(&self) -> &str {
        "proj"
    }

    fn replace_classpath(&self, entries: Vec<ClasspathEntry>) -> Result<()> {
        *self.entries.lock() = entries;
        *self.replacements.lock() += 1;
        Ok(())
    }
}

pub struct BundledBuilder(pub PathBuf);

impl BundleRegistry for BundledBuilder {
    fn exported_packages(&self, namespace: &str) -> Vec<ExportedPackage> {
        vec![ExportedPackage {
            name: namespace.to_string(),
            bundle: Some(Bundle {
                symbolic_name: taskbridge_core::home::BUNDLED_BUILDER_NAME.to_string(),
                version: BundleVersion::parse("1.0").unwrap(),
                location: self.0.clone(),
            }),
        }]
    }
}

pub const BUNDLED_HOME: &str = "/plugins/org.codehaus.gradle_1.0";

/// A workspace `/w` with `proj/build.x`, and a scheduler over recording
/// collaborators
pub struct Harness {
    pub workspace: TempDir,
    pub driver: Arc<RecordingDriver>,
    pub runner: Arc<DeferredJobRunner>,
    pub shell: Arc<RecordingShell>,
    pub scheduler: ExecScheduler,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(RecordingDriver::default(), SettingsPreferences::default())
    }

    pub fn with(driver: RecordingDriver, preferences: SettingsPreferences) -> Self {
        let workspace = TempDir::new().unwrap();
        std::fs::create_dir_all(workspace.path().join("proj")).unwrap();
        std::fs::write(workspace.path().join("proj/build.x"), "").unwrap();

        let driver = Arc::new(driver);
        let runner = Arc::new(DeferredJobRunner::new());
        let shell = Arc::new(RecordingShell::new());
        let scheduler = ExecScheduler::new(Collaborators {
            driver: driver.clone(),
            runner: runner.clone(),
            display: Arc::new(ImmediateDispatcher::new(shell.clone())),
            resolver: Arc::new(VariablePathResolver::new(workspace.path())),
            preferences: Arc::new(preferences),
            homes: BuilderHomeResolver::new("gradle", Arc::new(BundledBuilder(PathBuf::from(BUNDLED_HOME)))),
        });

        Self {
            workspace,
            driver,
            runner,
            shell,
            scheduler,
        }
    }

    pub fn build_file(&self) -> String {
        self.workspace.path().join("proj/build.x").to_string_lossy().into_owned()
    }

    pub fn project_dir(&self) -> PathBuf {
        self.workspace.path().join("proj")
    }
}
