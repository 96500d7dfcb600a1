//! Builder-home resolution
//!
//! The builder home is either the directory the user configured in the
//! preferences or, failing that, the installation directory of the newest
//! bundled builder.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    interfaces::{
        Bundle, BundleRegistry, DisplayDispatcher, ExportedPackage, MANUAL_BUILDER_HOME,
        PreferenceSource, USE_SPECIFIC_BUILDER_HOME,
    },
};

/// Symbolic name of the bundle that ships the builder
pub const BUNDLED_BUILDER_NAME: &str = "org.codehaus.gradle";

/// Namespace exported by anything providing the builder
pub const BUILDER_NAMESPACE: &str = "org.gradle";

pub const INVALID_BUILDER_HOME: &str = "Invalid builder home";

pub struct BuilderHomeResolver {
    tool: String,
    registry: Arc<dyn BundleRegistry>,
    cached_default: Mutex<Option<PathBuf>>,
}

impl BuilderHomeResolver {
    pub fn new(tool: impl Into<String>, registry: Arc<dyn BundleRegistry>) -> Self {
        Self {
            tool: tool.into(),
            registry,
            cached_default: Mutex::new(None),
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Resolve the builder home from `preferences`.
    ///
    /// A custom home that is enabled but blank raises one warning through
    /// `display` and falls back to the bundled default.
    pub fn resolve(
        &self,
        preferences: &dyn PreferenceSource,
        display: &dyn DisplayDispatcher,
    ) -> Result<PathBuf> {
        if preferences.get_bool(USE_SPECIFIC_BUILDER_HOME) {
            let manual = preferences.get_string(MANUAL_BUILDER_HOME);
            if !manual.trim().is_empty() {
                return Ok(PathBuf::from(manual));
            }

            tracing::warn!("{USE_SPECIFIC_BUILDER_HOME} is set but {MANUAL_BUILDER_HOME} is blank, using the bundled builder");
            display.post_warning(INVALID_BUILDER_HOME, INVALID_BUILDER_HOME);
        }

        self.default_home().ok_or(Error::MissingBuilderHome)
    }

    /// Installation directory of the newest bundled builder, discovered once
    pub fn default_home(&self) -> Option<PathBuf> {
        let mut cached = self.cached_default.lock();
        if let Some(home) = cached.as_ref() {
            return Some(home.clone());
        }

        let packages = self.registry.exported_packages(BUILDER_NAMESPACE);
        let bundle = find_highest_version(&packages)?;
        let home = bundle.location.clone();
        tracing::info!(
            "Using bundled builder {} {} at {}",
            bundle.symbolic_name,
            bundle.version,
            home.display()
        );

        if let Err(e) = make_scripts_executable(&home, &self.tool) {
            tracing::warn!("Could not mark builder scripts executable: {e}");
        }

        *cached = Some(home.clone());
        Some(home)
    }

    pub fn init_script_folder(&self) -> Option<PathBuf> {
        self.default_home().map(|home| home.join("initScripts"))
    }

    pub fn init_script(&self, script: &str) -> Option<PathBuf> {
        self.init_script_folder().map(|folder| folder.join(script))
    }
}

/// The newest bundle named [`BUNDLED_BUILDER_NAME`], or `None` as soon as any
/// other bundle also exports the namespace
pub fn find_highest_version(packages: &[ExportedPackage]) -> Option<&Bundle> {
    let mut candidates = Vec::new();
    for bundle in packages.iter().filter_map(|p| p.bundle.as_ref()) {
        if bundle.symbolic_name != BUNDLED_BUILDER_NAME {
            tracing::debug!(
                "{} also exports {BUILDER_NAMESPACE}, no default builder home",
                bundle.symbolic_name
            );
            return None;
        }
        candidates.push(bundle);
    }

    candidates.into_iter().max_by(|a, b| a.version.cmp(&b.version))
}

/// Mark `bin/<tool>` and `bin/<tool>.bat` executable. Missing scripts are
/// ignored and repeated calls change nothing.
#[cfg(unix)]
pub fn make_scripts_executable(home: &Path, tool: &str) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let bin = home.join("bin");
    for script in [bin.join(tool), bin.join(format!("{tool}.bat"))] {
        let Ok(metadata) = std::fs::metadata(&script) else {
            continue;
        };
        let mut permissions = metadata.permissions();
        let mode = permissions.mode();
        if mode & 0o111 != 0o111 {
            permissions.set_mode(mode | 0o111);
            std::fs::set_permissions(&script, permissions)?;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn make_scripts_executable(_home: &Path, _tool: &str) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{BundleVersion, Shell, UiTask};
    use parking_lot::Mutex as PlMutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bundle(name: &str, version: &str) -> ExportedPackage {
        ExportedPackage {
            name: BUILDER_NAMESPACE.to_string(),
            bundle: Some(Bundle {
                symbolic_name: name.to_string(),
                version: BundleVersion::parse(version).unwrap(),
                location: PathBuf::from(format!("/plugins/{name}_{version}")),
            }),
        }
    }

    struct StaticRegistry {
        packages: Vec<ExportedPackage>,
        lookups: AtomicUsize,
    }

    impl BundleRegistry for StaticRegistry {
        fn exported_packages(&self, _namespace: &str) -> Vec<ExportedPackage> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.packages.clone()
        }
    }

    struct Prefs(HashMap<&'static str, &'static str>);

    impl PreferenceSource for Prefs {
        fn get_bool(&self, name: &str) -> bool {
            self.0.get(name).is_some_and(|v| *v == "true")
        }

        fn get_string(&self, name: &str) -> String {
            self.0.get(name).unwrap_or(&"").to_string()
        }
    }

    #[derive(Default)]
    struct Warnings(PlMutex<Vec<String>>);

    impl Shell for Warnings {
        fn open_error(&self, title: &str, _message: &str) {
            self.0.lock().push(format!("error: {title}"));
        }

        fn open_warning(&self, title: &str, _message: &str) {
            self.0.lock().push(format!("warning: {title}"));
        }
    }

    impl DisplayDispatcher for Warnings {
        fn post_async(&self, task: UiTask) {
            task(self);
        }
    }

    fn resolver(packages: Vec<ExportedPackage>) -> (BuilderHomeResolver, Arc<StaticRegistry>) {
        let registry = Arc::new(StaticRegistry {
            packages,
            lookups: AtomicUsize::new(0),
        });
        (BuilderHomeResolver::new("gradle", registry.clone()), registry)
    }

    #[test]
    fn test_highest_version_wins() {
        let packages = vec![
            bundle(BUNDLED_BUILDER_NAME, "0.8"),
            ExportedPackage {
                name: BUILDER_NAMESPACE.to_string(),
                bundle: None,
            },
            bundle(BUNDLED_BUILDER_NAME, "0.9.2"),
        ];
        let highest = find_highest_version(&packages).unwrap();
        assert_eq!(highest.version.to_string(), "0.9.2");
    }

    #[test]
    fn test_foreign_provider_disables_default() {
        let packages = vec![
            bundle(BUNDLED_BUILDER_NAME, "0.9"),
            bundle("com.example.repackaged", "1.0"),
        ];
        assert!(find_highest_version(&packages).is_none());
    }

    #[test]
    fn test_manual_home_takes_precedence() {
        let (resolver, registry) = resolver(vec![bundle(BUNDLED_BUILDER_NAME, "0.9")]);
        let prefs = Prefs(HashMap::from([
            (USE_SPECIFIC_BUILDER_HOME, "true"),
            (MANUAL_BUILDER_HOME, "/opt/custom"),
        ]));
        let display = Warnings::default();

        assert_eq!(resolver.resolve(&prefs, &display).unwrap(), PathBuf::from("/opt/custom"));
        assert!(display.0.lock().is_empty());
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_manual_home_warns_once_and_falls_back() {
        let (resolver, _) = resolver(vec![bundle(BUNDLED_BUILDER_NAME, "0.9")]);
        let prefs = Prefs(HashMap::from([
            (USE_SPECIFIC_BUILDER_HOME, "true"),
            (MANUAL_BUILDER_HOME, "   "),
        ]));
        let display = Warnings::default();

        let home = resolver.resolve(&prefs, &display).unwrap();
        assert_eq!(home, PathBuf::from("/plugins/org.codehaus.gradle_0.9"));
        assert_eq!(*display.0.lock(), vec![format!("warning: {INVALID_BUILDER_HOME}")]);
    }

    #[test]
    fn test_default_home_is_discovered_once() {
        let (resolver, registry) = resolver(vec![bundle(BUNDLED_BUILDER_NAME, "0.9")]);
        let prefs = Prefs(HashMap::new());
        let display = Warnings::default();

        resolver.resolve(&prefs, &display).unwrap();
        resolver.resolve(&prefs, &display).unwrap();
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(
            resolver.init_script("init.gradle"),
            Some(PathBuf::from("/plugins/org.codehaus.gradle_0.9/initScripts/init.gradle"))
        );
    }

    #[test]
    fn test_no_home_at_all() {
        let (resolver, _) = resolver(Vec::new());
        let result = resolver.resolve(&Prefs(HashMap::new()), &Warnings::default());
        assert!(matches!(result, Err(Error::MissingBuilderHome)));
    }

    #[cfg(unix)]
    #[test]
    fn test_make_scripts_executable_is_idempotent() -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let home = tempfile::TempDir::new()?;
        let bin = home.path().join("bin");
        std::fs::create_dir_all(&bin)?;
        std::fs::write(bin.join("gradle"), "#!/bin/sh\n")?;
        std::fs::set_permissions(bin.join("gradle"), std::fs::Permissions::from_mode(0o644))?;

        make_scripts_executable(home.path(), "gradle")?;
        make_scripts_executable(home.path(), "gradle")?;

        let mode = std::fs::metadata(bin.join("gradle"))?.permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert!(!bin.join("gradle.bat").exists());
        Ok(())
    }
}
