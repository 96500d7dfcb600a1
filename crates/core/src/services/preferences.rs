//! Preference stores backed by settings maps

use serde_json::Value;
use std::collections::HashMap;

use crate::{config::Settings, interfaces::PreferenceSource};

#[derive(Debug, Clone, Default)]
pub struct SettingsPreferences {
    values: HashMap<String, Value>,
}

impl SettingsPreferences {
    pub fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.preferences.clone())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl PreferenceSource for SettingsPreferences {
    fn get_bool(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn get_string(&self, name: &str) -> String {
        match self.values.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Project-scoped values shadow workspace values key by key
#[derive(Debug, Clone, Default)]
pub struct LayeredPreferences {
    project: SettingsPreferences,
    workspace: SettingsPreferences,
}

impl LayeredPreferences {
    pub fn new(project: SettingsPreferences, workspace: SettingsPreferences) -> Self {
        Self { project, workspace }
    }

    fn layer_for(&self, name: &str) -> &SettingsPreferences {
        if self.project.contains(name) {
            &self.project
        } else {
            &self.workspace
        }
    }
}

impl PreferenceSource for LayeredPreferences {
    fn get_bool(&self, name: &str) -> bool {
        self.layer_for(name).get_bool(name)
    }

    fn get_string(&self, name: &str) -> String {
        self.layer_for(name).get_string(name)
    }
}
