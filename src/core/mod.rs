//! Ambient plumbing shared by every command
//!
//! - **config**: store configuration and credentials files
//! - **error**: error types with exit codes and help messages
//! - **logging**: tracing subscriber writing to stderr

pub mod config;
pub mod error;
pub mod logging;
