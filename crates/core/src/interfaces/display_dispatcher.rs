//! Marshalling onto the host's single UI thread

/// Dialog surface available on the UI thread
pub trait Shell {
    fn open_error(&self, title: &str, message: &str);

    fn open_warning(&self, title: &str, message: &str);
}

/// Work to run on the UI thread
pub type UiTask = Box<dyn FnOnce(&dyn Shell) + Send + 'static>;

/// Asynchronous dispatcher onto the UI thread.
///
/// The scheduler uses it only for dialogs raised from background contexts,
/// and never assumes it is already running on the UI thread.
pub trait DisplayDispatcher: Send + Sync {
    /// Enqueue `task` onto the UI thread and return immediately
    fn post_async(&self, task: UiTask);

    fn post_error(&self, title: &str, message: &str) {
        let (title, message) = (title.to_string(), message.to_string());
        self.post_async(Box::new(move |shell| shell.open_error(&title, &message)));
    }

    fn post_warning(&self, title: &str, message: &str) {
        let (title, message) = (title.to_string(), message.to_string());
        self.post_async(Box::new(move |shell| shell.open_warning(&title, &message)));
    }
}
