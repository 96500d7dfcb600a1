//! Display dispatchers and dialog surfaces

use parking_lot::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::interfaces::{DisplayDispatcher, Shell, UiTask};

/// Runs every task synchronously on the calling thread
pub struct ImmediateDispatcher<S> {
    shell: S,
}

impl<S: Shell> ImmediateDispatcher<S> {
    pub fn new(shell: S) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }
}

impl<S: Shell + Send + Sync> DisplayDispatcher for ImmediateDispatcher<S> {
    fn post_async(&self, task: UiTask) {
        task(&self.shell);
    }
}

/// A single dedicated UI thread draining a task queue
pub struct DisplayThread {
    sender: Mutex<Option<Sender<UiTask>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl DisplayThread {
    pub fn spawn<S: Shell + Send + 'static>(shell: S) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<UiTask>();
        let thread = thread::Builder::new()
            .name("display".to_string())
            .spawn(move || {
                for task in receiver {
                    task(&shell);
                }
                tracing::debug!("Display thread stopped");
            })?;

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            thread: Mutex::new(Some(thread)),
        })
    }

    /// Run every queued task, then stop the thread
    pub fn shutdown(&self) {
        self.sender.lock().take();
        if let Some(thread) = self.thread.lock().take() {
            if thread.join().is_err() {
                tracing::error!("Display thread panicked");
            }
        }
    }
}

impl DisplayDispatcher for DisplayThread {
    fn post_async(&self, task: UiTask) {
        match self.sender.lock().as_ref() {
            Some(sender) => {
                if sender.send(task).is_err() {
                    tracing::error!("Display thread is gone, dropping UI task");
                }
            }
            None => tracing::warn!("Display thread shut down, dropping UI task"),
        }
    }
}

impl Drop for DisplayThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Prints dialogs to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleShell;

impl Shell for ConsoleShell {
    fn open_error(&self, title: &str, message: &str) {
        eprintln!("❌ {title}: {message}");
    }

    fn open_warning(&self, title: &str, message: &str) {
        eprintln!("⚠️  {title}: {message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Error { title: String, message: String },
    Warning { title: String, message: String },
}

/// Records every dialog it is asked to open
#[derive(Debug, Default)]
pub struct RecordingShell {
    dialogs: Mutex<Vec<Dialog>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialogs(&self) -> Vec<Dialog> {
        self.dialogs.lock().clone()
    }

    pub fn warnings(&self) -> usize {
        self.dialogs
            .lock()
            .iter()
            .filter(|d| matches!(d, Dialog::Warning { .. }))
            .count()
    }
}

impl Shell for RecordingShell {
    fn open_error(&self, title: &str, message: &str) {
        self.dialogs.lock().push(Dialog::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn open_warning(&self, title: &str, message: &str) {
        self.dialogs.lock().push(Dialog::Warning {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl<S: Shell + ?Sized> Shell for std::sync::Arc<S> {
    fn open_error(&self, title: &str, message: &str) {
        (**self).open_error(title, message);
    }

    fn open_warning(&self, title: &str, message: &str) {
        (**self).open_warning(title, message);
    }
}
