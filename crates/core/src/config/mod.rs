//! Configuration management for taskbridge

mod settings;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, Settings};
