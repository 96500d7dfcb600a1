use std::path::{Path, PathBuf};
use std::process::Command;

use crate::interfaces::BuilderHandle;

/// A fully assembled invocation of the builder script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl BuilderCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// `<home>/bin/<tool>` run in the handle's working directory, with
    /// `<TOOL>_HOME` pointing at the home
    pub fn for_handle(handle: &BuilderHandle, tool: &str) -> Self {
        Self::new(script_path(handle.home_dir(), tool))
            .with_working_dir(handle.working_dir())
            .with_env(
                format!("{}_HOME", tool.to_ascii_uppercase()),
                handle.home_dir().to_string_lossy(),
            )
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            cmd.push(' ');
            if arg.is_empty() || arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        // Set working directory if specified
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

#[cfg(windows)]
fn script_path(home: &Path, tool: &str) -> PathBuf {
    home.join("bin").join(format!("{tool}.bat"))
}

#[cfg(not(windows))]
fn script_path(home: &Path, tool: &str) -> PathBuf {
    home.join("bin").join(tool)
}
