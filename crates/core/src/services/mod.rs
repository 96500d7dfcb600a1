//! Default collaborator implementations
//!
//! Concrete implementations of the interface traits, used by the console
//! host and by tests.

pub mod directory_bundle_registry;
pub mod display;
pub mod job_runners;
pub mod preferences;
pub mod process_driver;
pub mod variable_path_resolver;

pub use directory_bundle_registry::DirectoryBundleRegistry;
pub use display::{ConsoleShell, Dialog, DisplayThread, ImmediateDispatcher, RecordingShell};
pub use job_runners::{DeferredJobRunner, ThreadJobRunner};
pub use preferences::{LayeredPreferences, SettingsPreferences};
pub use process_driver::ProcessBuilderDriver;
pub use variable_path_resolver::VariablePathResolver;
