//! Default path resolver implementation
//!
//! Expands `${name}` and `${name:argument}` placeholders the way IDE string
//! variables work, then checks the result exists on disk.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::{
    error::{Error, Result},
    interfaces::PathResolver,
    types::cache_key::normalize,
};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.]*)(?::([^}]*))?\}").expect("placeholder pattern is valid")
});

pub const WORKSPACE_LOC: &str = "workspace_loc";
pub const ENV_VAR: &str = "env_var";

pub struct VariablePathResolver {
    workspace_root: PathBuf,
    variables: HashMap<String, String>,
}

impl VariablePathResolver {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            variables: HashMap::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_variables(mut self, variables: HashMap<String, String>) -> Self {
        self.variables.extend(variables);
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Expand every placeholder in `text` without touching the filesystem
    pub fn substitute(&self, text: &str) -> Result<String> {
        let mut failure = None;
        let expanded = PLACEHOLDER.replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let argument = caps.get(2).map(|m| m.as_str());
            match self.lookup(name, argument) {
                Some(value) => value,
                None => {
                    failure.get_or_insert_with(|| format!("unknown variable '{name}'"));
                    String::new()
                }
            }
        });

        match failure {
            Some(reason) => Err(Error::resolution(text, reason)),
            None => Ok(expanded.into_owned()),
        }
    }

    fn lookup(&self, name: &str, argument: Option<&str>) -> Option<String> {
        match (name, argument) {
            (WORKSPACE_LOC, None) => Some(self.workspace_root.to_string_lossy().into_owned()),
            (WORKSPACE_LOC, Some(relative)) => Some(
                self.workspace_root
                    .join(relative.trim_start_matches(['/', '\\']))
                    .to_string_lossy()
                    .into_owned(),
            ),
            (ENV_VAR, Some(var)) => std::env::var(var).ok(),
            (_, None) => self.variables.get(name).cloned(),
            _ => None,
        }
    }
}

impl PathResolver for VariablePathResolver {
    fn resolve(&self, user_path: &str) -> Result<PathBuf> {
        if user_path.trim().is_empty() {
            return Err(Error::resolution(user_path, "no build file given"));
        }

        let expanded = PathBuf::from(self.substitute(user_path)?);
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.workspace_root.join(expanded)
        };
        let path = normalize(&absolute);

        if !path.exists() {
            return Err(Error::resolution(user_path, format!("{} does not exist", path.display())));
        }
        Ok(path)
    }
}
