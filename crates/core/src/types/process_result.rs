use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use crate::interfaces::ProcessSink;

/// Transcript and exit status of one build run.
///
/// Written by the job thread, read by the UI. `complete` flips from false to
/// true exactly once and is always the last thing written, so a reader that
/// observes `is_complete()` also observes the final exit code and output.
#[derive(Debug, Default)]
pub struct ProcessResult {
    output: Mutex<String>,
    exit_code: AtomicI32,
    complete: Mutex<bool>,
    completed: Condvar,
}

impl ProcessResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code.load(Ordering::Acquire)
    }

    pub fn is_complete(&self) -> bool {
        *self.complete.lock()
    }

    /// Block until the run is complete
    pub fn wait(&self) {
        let mut complete = self.complete.lock();
        while !*complete {
            self.completed.wait(&mut complete);
        }
    }

    /// Block until the run is complete or the timeout elapses; returns completion
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut complete = self.complete.lock();
        if !*complete {
            self.completed.wait_for(&mut complete, timeout);
        }
        *complete
    }
}

impl ProcessSink for ProcessResult {
    fn append_output(&self, chunk: &str) {
        // Lock order: `complete`, then `output`
        let complete = self.complete.lock();
        if *complete {
            tracing::debug!("Dropping {} bytes of output after completion", chunk.len());
            return;
        }
        self.output.lock().push_str(chunk);
    }

    fn set_exit_code(&self, code: i32) {
        self.exit_code.store(code, Ordering::Release);
    }

    fn mark_complete(&self) -> bool {
        let mut complete = self.complete.lock();
        if *complete {
            return false;
        }
        *complete = true;
        self.completed.notify_all();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_complete_transitions_once() {
        let result = ProcessResult::new();
        assert!(!result.is_complete());
        assert!(result.mark_complete());
        assert!(!result.mark_complete());
        assert!(result.is_complete());
    }

    #[test]
    fn test_output_after_completion_is_dropped() {
        let result = ProcessResult::new();
        result.append_output("BUILD SUCCESSFUL\n");
        result.mark_complete();
        result.append_output("late line\n");
        assert_eq!(result.output(), "BUILD SUCCESSFUL\n");
    }

    #[test]
    fn test_reader_sees_exit_code_once_complete() {
        let result = Arc::new(ProcessResult::new());
        let writer = Arc::clone(&result);
        let handle = thread::spawn(move || {
            writer.append_output(":compileJava\n");
            writer.set_exit_code(3);
            writer.mark_complete();
        });

        result.wait();
        assert_eq!(result.exit_code(), 3);
        assert_eq!(result.output(), ":compileJava\n");
        handle.join().unwrap();
    }

    #[test]
    fn test_output_is_frozen_once_complete() {
        let result = Arc::new(ProcessResult::new());
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let writer = Arc::clone(&result);
                thread::spawn(move || {
                    for _ in 0..500 {
                        writer.append_output(&format!("{i}\n"));
                    }
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(1));
        assert!(result.mark_complete());
        let frozen = result.output();
        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(result.output(), frozen);
    }

    #[test]
    fn test_wait_timeout_without_completion() {
        let result = ProcessResult::new();
        assert!(!result.wait_timeout(Duration::from_millis(10)));
    }
}
