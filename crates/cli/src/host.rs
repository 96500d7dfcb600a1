//! Console host: wires real collaborators around the scheduler

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use taskbridge_core::{
    BuilderHomeResolver, ClasspathEntry, Collaborators, ExecScheduler, Settings,
    config::CONFIG_FILE_NAMES,
    interfaces::ClasspathProject,
    services::{
        ConsoleShell, DirectoryBundleRegistry, DisplayThread, LayeredPreferences,
        ProcessBuilderDriver, SettingsPreferences, ThreadJobRunner, VariablePathResolver,
    },
};

/// Directory scanned for bundled builders when the settings name none
pub const DEFAULT_BUNDLES_DIR: &str = "bundles";

pub struct ConsoleHost {
    workspace_root: PathBuf,
    settings: Settings,
    settings_file: Option<PathBuf>,
    display: Arc<DisplayThread>,
    resolver: Arc<VariablePathResolver>,
    scheduler: ExecScheduler,
}

impl ConsoleHost {
    /// Discover settings from `cwd` (or the current directory) and build a
    /// scheduler over the console collaborators
    pub fn open(cwd: Option<&Path>) -> Result<Self> {
        let workspace_root = match cwd {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let workspace_root = workspace_root
            .canonicalize()
            .with_context(|| format!("Workspace root {} does not exist", workspace_root.display()))?;

        let (settings, settings_file) = Settings::discover(&workspace_root)?;
        debug!(
            "Workspace root {} (settings: {})",
            workspace_root.display(),
            settings_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string())
        );

        let display = Arc::new(DisplayThread::spawn(ConsoleShell).context("Failed to start display thread")?);
        let bundles_dir = settings
            .bundles_dir
            .clone()
            .unwrap_or_else(|| workspace_root.join(DEFAULT_BUNDLES_DIR));

        let resolver = Arc::new(
            VariablePathResolver::new(&workspace_root).with_variables(settings.variables.clone()),
        );

        let scheduler = ExecScheduler::new(Collaborators {
            driver: Arc::new(ProcessBuilderDriver::from_settings(&settings)),
            runner: Arc::new(ThreadJobRunner::new()),
            display: display.clone(),
            resolver: resolver.clone(),
            preferences: Arc::new(SettingsPreferences::from_settings(&settings)),
            homes: BuilderHomeResolver::new(
                settings.tool.clone(),
                Arc::new(DirectoryBundleRegistry::new(bundles_dir, settings.tool.clone())),
            ),
        });

        Ok(Self {
            workspace_root,
            settings,
            settings_file,
            display,
            resolver,
            scheduler,
        })
    }

    pub fn scheduler(&self) -> &ExecScheduler {
        &self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_file(&self) -> Option<&Path> {
        self.settings_file.as_deref()
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Expand placeholders in `build_file` and anchor relative paths at the
    /// workspace root, without requiring the file to exist
    pub fn expand_build_file(&self, build_file: &str) -> Result<String> {
        let expanded = PathBuf::from(self.resolver.substitute(build_file)?);
        let path = if expanded.is_absolute() {
            expanded
        } else {
            self.workspace_root.join(expanded)
        };
        Ok(path.to_string_lossy().into_owned())
    }

    /// Preferences of `project_dir`'s own settings file layered over the
    /// workspace preferences
    pub fn project_preferences(&self, project_dir: &Path) -> Result<LayeredPreferences> {
        let workspace = SettingsPreferences::from_settings(&self.settings);
        let project_file = CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|path| path.is_file() && Some(path.as_path()) != self.settings_file());

        let project = match project_file {
            Some(path) => {
                debug!("Project settings from {}", path.display());
                let settings = Settings::load_from_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                SettingsPreferences::from_settings(&settings)
            }
            None => SettingsPreferences::default(),
        };
        Ok(LayeredPreferences::new(project, workspace))
    }

    /// Flush every pending dialog to the console
    pub fn shutdown(&self) {
        self.display.shutdown();
    }
}

/// A project directory whose classpath is kept in a JSON file
pub struct FileClasspathProject {
    name: String,
    file: PathBuf,
}

impl FileClasspathProject {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        Self {
            name,
            file: dir.join(file_name),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn read_entries(&self) -> Result<Vec<ClasspathEntry>> {
        let contents = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl ClasspathProject for FileClasspathProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn replace_classpath(&self, entries: Vec<ClasspathEntry>) -> taskbridge_core::Result<()> {
        let contents = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.file, contents)?;
        Ok(())
    }
}
