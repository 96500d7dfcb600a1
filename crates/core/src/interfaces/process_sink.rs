//! Receiver of a build run's transcript

/// User-visible process handle a build run streams into
pub trait ProcessSink: Send + Sync {
    /// Append a chunk of stdout/stderr as it is produced
    fn append_output(&self, chunk: &str);

    fn set_exit_code(&self, code: i32);

    /// Mark the run complete. Returns `false` if it was already complete.
    fn mark_complete(&self) -> bool;
}
