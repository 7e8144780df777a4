//! Error types for snapcraft with contextual messages and exit codes
//!
//! Every fatal path of the CLI ends up here. Malformed channel map entries are
//! not errors: they are logged and rendered as partial rows.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for snapcraft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (credentials, config, invalid args)
  User = 1,
  /// System error (store, network, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for snapcraft
#[derive(Debug)]
pub enum SnapError {
  /// Authentication errors
  Auth(AuthError),

  /// Errors reported by (or while talking to) the store
  Store(StoreError),

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl SnapError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SnapError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    SnapError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      SnapError::Message { message, context, help } => SnapError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      SnapError::Auth(_) => ExitCode::User,
      SnapError::Store(_) => ExitCode::System,
      SnapError::Config(_) => ExitCode::User,
      SnapError::Io(_) => ExitCode::System,
      SnapError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SnapError::Auth(e) => e.help_message(),
      SnapError::Store(e) => e.help_message(),
      SnapError::Config(e) => e.help_message(),
      SnapError::Message { help, .. } => help.clone(),
      SnapError::Io(_) => None,
    }
  }
}

impl fmt::Display for SnapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SnapError::Auth(e) => write!(f, "{}", e),
      SnapError::Store(e) => write!(f, "{}", e),
      SnapError::Config(e) => write!(f, "{}", e),
      SnapError::Io(e) => write!(f, "I/O error: {}", e),
      SnapError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for SnapError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SnapError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for SnapError {
  fn from(err: io::Error) -> Self {
    SnapError::Io(err)
  }
}

impl From<String> for SnapError {
  fn from(msg: String) -> Self {
    SnapError::message(msg)
  }
}

impl From<&str> for SnapError {
  fn from(msg: &str) -> Self {
    SnapError::message(msg)
  }
}

impl From<AuthError> for SnapError {
  fn from(err: AuthError) -> Self {
    SnapError::Auth(err)
  }
}

impl From<StoreError> for SnapError {
  fn from(err: StoreError) -> Self {
    SnapError::Store(err)
  }
}

impl From<ConfigError> for SnapError {
  fn from(err: ConfigError) -> Self {
    SnapError::Config(err)
  }
}

impl From<serde_json::Error> for SnapError {
  fn from(err: serde_json::Error) -> Self {
    SnapError::message(format!("JSON error: {}", err))
  }
}

impl From<reqwest::Error> for SnapError {
  fn from(err: reqwest::Error) -> Self {
    SnapError::Store(StoreError::Transport {
      message: err.to_string(),
    })
  }
}

/// Authentication errors
#[derive(Debug)]
pub enum AuthError {
  /// No credentials file, or one without a macaroon
  NoCredentials,

  /// The store refused the credentials we sent
  Rejected { message: String },
}

impl AuthError {
  fn help_message(&self) -> Option<String> {
    match self {
      AuthError::NoCredentials => None,
      AuthError::Rejected { .. } => Some("Your credentials may have expired. Run `snapcraft login` again.".to_string()),
    }
  }
}

impl fmt::Display for AuthError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AuthError::NoCredentials => {
        write!(f, "No valid credentials found. Have you run \"snapcraft login\"?")
      }
      AuthError::Rejected { message } => {
        write!(f, "The store rejected the provided credentials: {}", message)
      }
    }
  }
}

/// Store errors, surfaced to the user verbatim
#[derive(Debug)]
pub enum StoreError {
  /// Non-success HTTP status with the store's own error messages
  Api { status: u16, messages: Vec<String> },

  /// The request never produced a response
  Transport { message: String },

  /// A success response whose body could not be decoded
  InvalidResponse { message: String },
}

impl StoreError {
  fn help_message(&self) -> Option<String> {
    match self {
      StoreError::Transport { .. } => {
        Some("Check your network connection, or point --store-url at a reachable store.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for StoreError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StoreError::Api { status, messages } => {
        if messages.is_empty() {
          write!(f, "Store request failed with status {}", status)
        } else {
          write!(f, "{}", messages.join("\n"))
        }
      }
      StoreError::Transport { message } => write!(f, "Could not reach the store: {}", message),
      StoreError::InvalidResponse { message } => write!(f, "Unexpected store response: {}", message),
    }
  }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
  /// File exists but could not be read
  Unreadable { path: PathBuf, reason: String },

  /// File was read but is not valid
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Unreadable { path, .. } => Some(format!("Check the permissions of {}", path.display())),
      ConfigError::Invalid { path, .. } => Some(format!("Fix or remove {} and try again.", path.display())),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Unreadable { path, reason } => {
        write!(f, "Failed to read {}: {}", path.display(), reason)
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for snapcraft
pub type SnapResult<T> = Result<T, SnapError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SnapResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SnapError>,
{
  fn context(self, ctx: impl Into<String>) -> SnapResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }
}

/// Print an error to stderr with its help text
pub fn print_error(error: &SnapError) {
  eprintln!("{}", error);

  if let Some(help) = error.help_message() {
    eprintln!("Help: {}", help);
  }
}
