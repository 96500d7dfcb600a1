//! Collaborator interfaces consumed by the scheduler
//!
//! Everything the host supplies (UI thread, job runtime, preference stores,
//! path expansion, the builder itself) is reached through these traits so the
//! scheduler can be driven by a real IDE host, the console host, or tests.

pub mod builder_driver;
pub mod bundle_registry;
pub mod display_dispatcher;
pub mod job_runner;
pub mod path_resolver;
pub mod preference_source;
pub mod process_sink;
pub mod project;

pub use builder_driver::{BuilderDriver, BuilderHandle};
pub use bundle_registry::{Bundle, BundleRegistry, BundleVersion, ExportedPackage};
pub use display_dispatcher::{DisplayDispatcher, Shell, UiTask};
pub use job_runner::JobRunner;
pub use path_resolver::PathResolver;
pub use preference_source::{MANUAL_BUILDER_HOME, PreferenceSource, USE_SPECIFIC_BUILDER_HOME};
pub use process_sink::ProcessSink;
pub use project::ClasspathProject;
