pub mod cache_key;
pub mod launch;
pub mod process_result;
pub mod project_view;

// Re-export commonly used types
pub use cache_key::CacheKey;
pub use launch::{ATTR_LOCATION, LaunchConfiguration};
pub use process_result::ProcessResult;
pub use project_view::{ClasspathEntry, ClasspathKind, ProjectView, TaskView};
