//! Builder driver that runs the builder script as a child process

use parking_lot::Mutex;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use crate::{
    command::{BuilderCommand, split_command_line},
    config::Settings,
    error::{Error, Result},
    interfaces::{BuilderDriver, BuilderHandle, ProcessSink},
    job::JobMonitor,
    types::ProjectView,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

pub struct ProcessBuilderDriver {
    tool: String,
    task_query_args: Vec<String>,
}

impl ProcessBuilderDriver {
    pub fn new(tool: impl Into<String>, task_query_args: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            task_query_args,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tool.clone(), settings.task_query_args.clone())
    }

    /// The command used to compute the project view of `build_file`
    pub fn task_query_command(&self, handle: &BuilderHandle, build_file: &Path) -> BuilderCommand {
        let file_name = build_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        BuilderCommand::for_handle(handle, &self.tool)
            .with_args(self.task_query_args.iter().cloned())
            .with_args(["-b".to_string(), file_name])
    }
}

impl BuilderDriver for ProcessBuilderDriver {
    fn project_views(
        &self,
        handle: &BuilderHandle,
        build_file: &Path,
        monitor: &JobMonitor,
    ) -> Result<ProjectView> {
        let command = self.task_query_command(handle, build_file);
        tracing::debug!("Querying project view: {}", command.to_shell_command());

        let stdout = Mutex::new(String::new());
        let stderr = Mutex::new(String::new());
        let status = supervise(command.to_command(), monitor, &|stream, line| match stream {
            Stream::Stdout => stdout.lock().push_str(line),
            Stream::Stderr => stderr.lock().push_str(line),
        })?;

        if !status.success() {
            let diagnostic = stderr.into_inner().trim().to_string();
            return Err(Error::Driver(if diagnostic.is_empty() {
                format!("{} exited with {status}", self.tool)
            } else {
                diagnostic
            }));
        }

        serde_json::from_str(&stdout.into_inner())
            .map_err(|e| Error::Driver(format!("Unreadable project view from {}: {e}", self.tool)))
    }

    fn run(
        &self,
        handle: &BuilderHandle,
        command_line: &str,
        sink: &dyn ProcessSink,
        monitor: &JobMonitor,
    ) -> Result<i32> {
        let command = BuilderCommand::for_handle(handle, &self.tool).with_args(split_command_line(command_line)?);
        tracing::info!("Running: {}", command.to_shell_command());

        let status = supervise(command.to_command(), monitor, &|_, line| sink.append_output(line))?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Spawn `command`, forward its output line by line and wait for it,
/// killing the child once `monitor` reports cancellation
fn supervise(
    mut command: Command,
    monitor: &JobMonitor,
    on_line: &(dyn Fn(Stream, &str) + Sync),
) -> Result<ExitStatus> {
    monitor.checkpoint()?;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .map_err(|e| Error::Driver(format!("Could not start builder: {e}")))?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    thread::scope(|scope| {
        if let Some(out) = stdout {
            scope.spawn(move || pump(out, Stream::Stdout, on_line));
        }
        if let Some(err) = stderr {
            scope.spawn(move || pump(err, Stream::Stderr, on_line));
        }
        wait_or_kill(&mut child, monitor)
    })
}

fn pump(reader: impl Read, stream: Stream, on_line: &(dyn Fn(Stream, &str) + Sync)) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => on_line(stream, &String::from_utf8_lossy(&buf)),
            Err(e) => {
                tracing::debug!("Stopped reading {stream:?}: {e}");
                break;
            }
        }
    }
}

fn wait_or_kill(child: &mut Child, monitor: &JobMonitor) -> Result<ExitStatus> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if monitor.is_cancelled() {
            tracing::info!("Terminating builder process {}", child.id());
            if let Err(e) = child.kill() {
                tracing::warn!("Could not kill builder process: {e}");
            }
            child.wait()?;
            return Err(Error::Cancelled);
        }

        thread::sleep(POLL_INTERVAL);
    }
}
