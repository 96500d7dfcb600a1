use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::commands::refresh::exit_code;
use crate::display::{format_classpath, format_status};
use crate::host::{ConsoleHost, FileClasspathProject};

pub fn classpath_command(cwd: Option<&Path>, build_file: &str, project_dir: &Path) -> Result<i32> {
    let host = ConsoleHost::open(cwd)?;
    let project_dir = if project_dir.is_absolute() {
        project_dir.to_path_buf()
    } else {
        host.workspace_root().join(project_dir)
    };
    let project = Arc::new(FileClasspathProject::new(&project_dir, &host.settings().classpath_file));
    let preferences = host.project_preferences(&project_dir)?;

    let handle = host
        .scheduler()
        .update_classpath_with(&preferences, build_file, project.clone())
        .with_context(|| format!("Failed to update classpath of {}", project_dir.display()))?;
    let status = handle.join();
    host.shutdown();

    println!("{}", format_status(&handle.descriptor().name, &status));
    if status.is_ok() {
        println!("📄 {}", project.file().display());
        print!("{}", format_classpath(&project.read_entries()?));
    }
    Ok(exit_code(&status))
}
