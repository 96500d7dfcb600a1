//! taskbridge - Drive an external build tool from a host application
//!
//! This crate provides:
//! - A scheduler that turns view, refresh, classpath and run requests into jobs
//! - A concurrent cache of computed project/task trees keyed by build file
//! - Collaborator traits for the host's UI thread, job runtime, preferences
//!   and the builder itself, with default implementations
//! - Builder-home resolution from preferences or bundled installations
pub mod cache;
pub mod command;
pub mod config;
pub mod error;
pub mod home;
pub mod interfaces;
pub mod job;
pub mod scheduler;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use cache::BuildInformationCache;
pub use config::Settings;
pub use home::BuilderHomeResolver;
pub use job::{JobHandle, JobStatus};
pub use scheduler::{Collaborators, ExecScheduler, RefreshOutcome};
