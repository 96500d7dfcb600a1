//! Builder command assembly and execution

pub mod builder_command;
pub mod command_line;

// Re-export commonly used types
pub use builder_command::BuilderCommand;
pub use command_line::{append_build_file, join_command_line, quote_arg, split_command_line};
