pub mod classpath;
pub mod home;
pub mod init;
pub mod refresh;
pub mod run;
pub mod tasks;

pub use classpath::classpath_command;
pub use home::home_command;
pub use init::init_command;
pub use refresh::refresh_command;
pub use run::run_command;
pub use tasks::tasks_command;
