use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use taskbridge_core::{
    JobStatus, LaunchConfiguration, ProcessResult, command::join_command_line, interfaces::ProcessSink,
    types::ATTR_LOCATION,
};

use crate::display::format_status;
use crate::host::ConsoleHost;

/// Sink that echoes the transcript while recording it
struct EchoSink(ProcessResult);

impl ProcessSink for EchoSink {
    fn append_output(&self, chunk: &str) {
        print!("{chunk}");
        self.0.append_output(chunk);
    }

    fn set_exit_code(&self, code: i32) {
        self.0.set_exit_code(code);
    }

    fn mark_complete(&self) -> bool {
        self.0.mark_complete()
    }
}

pub fn run_command(cwd: Option<&Path>, build_file: &str, args: &[String]) -> Result<i32> {
    let host = ConsoleHost::open(cwd)?;
    let command_line = join_command_line(args);

    let configuration = LaunchConfiguration::new(if command_line.is_empty() {
        build_file.to_string()
    } else {
        command_line.clone()
    })
    .with_attribute(ATTR_LOCATION, build_file);

    let sink = Arc::new(EchoSink(ProcessResult::new()));
    let handle = host
        .scheduler()
        .run_build(&configuration, &command_line, sink.clone())
        .with_context(|| format!("Failed to run {build_file}"))?;
    info!(
        "Running: {}",
        handle.descriptor().command_line.as_deref().unwrap_or_default()
    );

    let status = handle.join();
    host.shutdown();

    let exit = sink.0.exit_code();
    match status {
        JobStatus::Ok => Ok(0),
        JobStatus::Cancelled => {
            eprintln!("{}", format_status(&handle.descriptor().name, &status));
            Ok(130)
        }
        // The transcript already explains a non-zero exit
        JobStatus::Error(_) if exit != 0 => Ok(exit),
        JobStatus::Error(_) => {
            eprintln!("{}", format_status(&handle.descriptor().name, &status));
            Ok(1)
        }
    }
}
