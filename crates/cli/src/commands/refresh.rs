use anyhow::Result;
use std::path::Path;

use taskbridge_core::{JobStatus, RefreshOutcome};

use crate::display::format_status;
use crate::host::ConsoleHost;

pub fn refresh_command(cwd: Option<&Path>, build_file: &str, background: bool) -> Result<i32> {
    let host = ConsoleHost::open(cwd)?;
    let build_file = host.expand_build_file(build_file)?;
    let name = format!("Refreshing tasks of {build_file}");

    let status = match host.scheduler().refresh_task_view(&build_file, !background) {
        RefreshOutcome::Skipped => {
            println!("⏭️  Skipped: {build_file} is not in an existing directory");
            host.shutdown();
            return Ok(0);
        }
        RefreshOutcome::Scheduled(handle) => {
            println!("🚀 Scheduled job {}", handle.id());
            handle.join()
        }
        RefreshOutcome::Completed(status) => status,
    };
    host.shutdown();

    println!("{}", format_status(&name, &status));
    if let Some(view) = host.scheduler().cache().get(&build_file.as_str().into()) {
        println!("   {} tasks cached", view.task_count());
    }
    Ok(exit_code(&status))
}

pub(crate) fn exit_code(status: &JobStatus) -> i32 {
    match status {
        JobStatus::Ok => 0,
        JobStatus::Error(_) => 1,
        JobStatus::Cancelled => 130,
    }
}
