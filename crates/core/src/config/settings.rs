use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File names searched for, in order, in each directory
pub const CONFIG_FILE_NAMES: [&str; 2] = [".taskbridge.json", "taskbridge.json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Script name under `<builder-home>/bin`
    #[serde(default = "default_tool")]
    pub tool: String,

    // Preference store backing `use-specific-builder-home` and friends
    #[serde(default)]
    pub preferences: HashMap<String, Value>,

    // Extra `${name}` placeholders for build-file paths
    #[serde(default)]
    pub variables: HashMap<String, String>,

    /// Directory scanned for bundled builder installations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundles_dir: Option<PathBuf>,

    /// Arguments that make the builder print its project view as JSON
    #[serde(default = "default_task_query_args")]
    pub task_query_args: Vec<String>,

    #[serde(default = "default_classpath_file")]
    pub classpath_file: String,
}

fn default_tool() -> String {
    "gradle".to_string()
}

fn default_task_query_args() -> Vec<String> {
    vec![
        "--quiet".to_string(),
        "taskbridgeProjectView".to_string(),
    ]
}

fn default_classpath_file() -> String {
    ".taskbridge-classpath.json".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            preferences: HashMap::new(),
            variables: HashMap::new(),
            bundles_dir: None,
            task_query_args: default_task_query_args(),
            classpath_file: default_classpath_file(),
        }
    }
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)
            .map_err(|e| Error::InvalidConfiguration(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Settings from the nearest config file above `start_path`, or defaults.
    /// A relative `bundles_dir` is taken relative to the config file.
    pub fn discover(start_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        let Some(path) = Self::find_config_file(start_path) else {
            tracing::debug!("No settings file above {}, using defaults", start_path.display());
            return Ok((Self::default(), None));
        };

        tracing::debug!("Loading settings from {}", path.display());
        let mut settings = Self::load_from_file(&path)?;
        if let (Some(dir), Some(base)) = (settings.bundles_dir.as_ref(), path.parent()) {
            if dir.is_relative() {
                settings.bundles_dir = Some(base.join(dir));
            }
        }
        Ok((settings, Some(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"tool": "builder"}"#).unwrap();
        assert_eq!(settings.tool, "builder");
        assert_eq!(settings.task_query_args, default_task_query_args());
        assert!(settings.preferences.is_empty());
    }

    #[test]
    fn test_round_trip_through_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(".taskbridge.json");
        let mut settings = Settings::default();
        settings
            .preferences
            .insert("use-specific-builder-home".into(), Value::Bool(true));
        settings.save_to_file(&path)?;

        assert_eq!(Settings::load_from_file(&path)?, settings);
        Ok(())
    }

    #[test]
    fn test_discover_walks_up_and_resolves_bundles_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let nested = dir.path().join("proj").join("sub");
        std::fs::create_dir_all(&nested)?;
        std::fs::write(
            dir.path().join("taskbridge.json"),
            r#"{"bundles_dir": "plugins"}"#,
        )?;

        let (settings, found) = Settings::discover(&nested)?;
        assert_eq!(found, Some(dir.path().join("taskbridge.json")));
        assert_eq!(settings.bundles_dir, Some(dir.path().join("plugins")));
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".taskbridge.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from_file(&path),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
