//! Bundle registry over a plugins directory
//!
//! Every `<symbolic-name>_<version>` directory that ships `bin/<tool>` (or
//! `bin/<tool>.bat`) counts as a provider of the builder namespace.

use std::path::{Path, PathBuf};

use crate::interfaces::{Bundle, BundleRegistry, BundleVersion, ExportedPackage};

pub struct DirectoryBundleRegistry {
    root: PathBuf,
    tool: String,
}

impl DirectoryBundleRegistry {
    pub fn new(root: impl Into<PathBuf>, tool: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tool: tool.into(),
        }
    }

    fn provides_tool(&self, dir: &Path) -> bool {
        let bin = dir.join("bin");
        bin.join(&self.tool).is_file() || bin.join(format!("{}.bat", self.tool)).is_file()
    }
}

/// Split `name_1.2.3` at the last underscore that is followed by a version
fn parse_bundle_dir(file_name: &str) -> Option<(String, BundleVersion)> {
    let (name, version) = file_name.rsplit_once('_')?;
    let version = BundleVersion::parse(version)?;
    Some((name.to_string(), version))
}

impl BundleRegistry for DirectoryBundleRegistry {
    fn exported_packages(&self, namespace: &str) -> Vec<ExportedPackage> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Cannot scan bundles in {}: {e}", self.root.display());
                return Vec::new();
            }
        };

        let mut packages = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_dir() || !self.provides_tool(&path) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            let bundle = parse_bundle_dir(&file_name).map(|(symbolic_name, version)| Bundle {
                symbolic_name,
                version,
                location: path.clone(),
            });
            packages.push(ExportedPackage {
                name: namespace.to_string(),
                bundle,
            });
        }

        packages.sort_by(|a, b| {
            let location = |p: &ExportedPackage| p.bundle.as_ref().map(|b| b.location.clone());
            location(a).cmp(&location(b))
        });
        packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install(root: &Path, dir: &str, script: &str) {
        let bin = root.join(dir).join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join(script), "").unwrap();
    }

    #[test]
    fn test_parse_bundle_dir() {
        let (name, version) = parse_bundle_dir("org.codehaus.gradle_0.9.2").unwrap();
        assert_eq!(name, "org.codehaus.gradle");
        assert_eq!(version.to_string(), "0.9.2");
        assert!(parse_bundle_dir("no-version").is_none());
    }

    #[test]
    fn test_only_directories_shipping_the_tool_are_providers() {
        let root = TempDir::new().unwrap();
        install(root.path(), "org.codehaus.gradle_0.9", "gradle");
        install(root.path(), "org.codehaus.gradle_0.8", "gradle.bat");
        std::fs::create_dir_all(root.path().join("org.unrelated_1.0")).unwrap();

        let packages = DirectoryBundleRegistry::new(root.path(), "gradle").exported_packages("org.gradle");
        assert_eq!(packages.len(), 2);
        assert!(packages.iter().all(|p| p.name == "org.gradle"));
        let versions: Vec<_> = packages
            .iter()
            .map(|p| p.bundle.as_ref().unwrap().version.to_string())
            .collect();
        assert_eq!(versions, vec!["0.8.0", "0.9.0"]);
    }

    #[test]
    fn test_unversioned_provider_has_no_bundle() {
        let root = TempDir::new().unwrap();
        install(root.path(), "gradle-local", "gradle");
        let packages = DirectoryBundleRegistry::new(root.path(), "gradle").exported_packages("org.gradle");
        assert_eq!(packages.len(), 1);
        assert!(packages[0].bundle.is_none());
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let registry = DirectoryBundleRegistry::new("/definitely/not/here", "gradle");
        assert!(registry.exported_packages("org.gradle").is_empty());
    }
}
