use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute holding the unresolved build-file location of a launch
pub const ATTR_LOCATION: &str = "location";

/// A user-defined launch of the builder, as stored by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfiguration {
    pub name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl LaunchConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attributes.get(key).map(|v| v.as_str()).unwrap_or(default)
    }

    /// Build-file location as the user typed it, placeholders included
    pub fn location(&self) -> &str {
        self.attribute(ATTR_LOCATION, "")
    }
}
