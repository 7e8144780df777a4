//! Log sink setup
//!
//! Everything logged goes to stderr so the release report on stdout stays clean.

use crate::core::error::{SnapError, SnapResult};
use std::io::{self, IsTerminal};
pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
  /// Show all logs (trace level)
  Trace,
  /// Show debug and above
  Debug,
  /// Show info and above
  Info,
  /// Show warnings and above (default)
  Warn,
  /// Show errors only
  Error,
}

impl From<LogLevel> for Level {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Trace => Level::TRACE,
      LogLevel::Debug => Level::DEBUG,
      LogLevel::Info => Level::INFO,
      LogLevel::Warn => Level::WARN,
      LogLevel::Error => Level::ERROR,
    }
  }
}

/// Build the filter: `RUST_LOG` wins, otherwise the CLI level applies to this crate
fn build_filter(level: Level) -> SnapResult<EnvFilter> {
  EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(format!("snapcraft={}", level.as_str().to_lowercase())))
    .map_err(|e| SnapError::message(format!("Failed to create log filter: {}", e)))
}

/// Install the global subscriber
pub fn init(level: LogLevel) -> SnapResult<()> {
  let filter = build_filter(level.into())?;
  let layer = tracing_subscriber::fmt::layer()
    .compact()
    .with_writer(io::stderr)
    .with_target(false)
    .with_ansi(io::stderr().is_terminal())
    .without_time();

  tracing_subscriber::registry()
    .with(filter)
    .with(layer)
    .try_init()
    .map_err(|e| SnapError::message(format!("Failed to initialize logging: {}", e)))?;

  tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialized");
  Ok(())
}
