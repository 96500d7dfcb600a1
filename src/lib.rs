//! taskbridge - facade over the core library
//!
//! The console host lives in `taskbridge-cli`; this package re-exports the
//! core API and owns the cross-crate integration tests.
pub use taskbridge_core::*;
