//! Store configuration and credentials
//!
//! Both live as TOML files in the snapcraft config directory.

use crate::core::error::{AuthError, ConfigError, SnapError, SnapResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SNAPCRAFT_CONFIG_DIR";

/// Store used when nothing else is configured
pub const DEFAULT_STORE_URL: &str = "https://dashboard.snapcraft.io";

const CONFIG_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.toml";

/// Store configuration
/// Searched in order: $SNAPCRAFT_CONFIG_DIR/config.toml, <config dir>/snapcraft/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
  /// Base URL of the store API
  #[serde(default = "default_store_url")]
  pub store_url: String,

  /// Request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_store_url() -> String {
  DEFAULT_STORE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      store_url: default_store_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl StoreConfig {
  /// Load from `dir/config.toml`, falling back to defaults when the file is absent
  pub fn load(dir: &Path) -> SnapResult<Self> {
    let path = dir.join(CONFIG_FILE);
    let Some(content) = read_optional(&path)? else {
      tracing::debug!(path = %path.display(), "No store config found, using defaults");
      return Ok(Self::default());
    };

    let config: StoreConfig = toml_edit::de::from_str(&content).map_err(|e| invalid(&path, e))?;
    config.validate(&path)?;
    Ok(config)
  }

  /// Replace the store URL when an override was given on the command line or environment
  pub fn with_store_url(mut self, store_url: Option<String>) -> Self {
    if let Some(url) = store_url {
      self.store_url = url;
    }
    self
  }

  /// Request timeout
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  fn validate(&self, path: &Path) -> SnapResult<()> {
    if !(self.store_url.starts_with("http://") || self.store_url.starts_with("https://")) {
      return Err(
        ConfigError::Invalid {
          path: path.to_path_buf(),
          reason: format!("store_url '{}' must be an http(s) URL", self.store_url),
        }
        .into(),
      );
    }
    if self.timeout_secs == 0 {
      return Err(
        ConfigError::Invalid {
          path: path.to_path_buf(),
          reason: "timeout_secs must be greater than zero".to_string(),
        }
        .into(),
      );
    }
    Ok(())
  }
}

/// Store credentials (discharged macaroon pair)
///
/// ```toml
/// macaroon = "MDAxY2xvY2F0aW9u..."
/// discharge = "MDAxZGxvY2F0aW9u..."
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
  pub macaroon: String,
  #[serde(default)]
  pub discharge: Option<String>,
}

// Never print secrets, even in debug logs
impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("macaroon", &"<redacted>")
      .field("discharge", &self.discharge.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

impl Credentials {
  /// Load from `dir/credentials.toml`
  ///
  /// A missing file, or one with an empty macaroon, means the user never logged in.
  pub fn load(dir: &Path) -> SnapResult<Self> {
    let path = dir.join(CREDENTIALS_FILE);
    let content = read_optional(&path)?.ok_or(AuthError::NoCredentials)?;

    let credentials: Credentials = toml_edit::de::from_str(&content).map_err(|e| invalid(&path, e))?;
    if credentials.macaroon.trim().is_empty() {
      return Err(AuthError::NoCredentials.into());
    }
    Ok(credentials)
  }

  /// Value for the `Authorization` header
  pub fn authorization_header(&self) -> String {
    match &self.discharge {
      Some(discharge) => format!("Macaroon root=\"{}\", discharge=\"{}\"", self.macaroon, discharge),
      None => format!("Macaroon root=\"{}\"", self.macaroon),
    }
  }
}

/// Resolve the configuration directory: explicit override first, then the platform config dir
pub fn config_dir() -> SnapResult<PathBuf> {
  if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
    return Ok(PathBuf::from(dir));
  }

  dirs::config_dir()
    .map(|dir| dir.join("snapcraft"))
    .ok_or_else(|| {
      SnapError::with_help(
        "Could not determine the configuration directory",
        format!("Set {} to the directory holding config.toml and credentials.toml", CONFIG_DIR_ENV),
      )
    })
}

fn read_optional(path: &Path) -> SnapResult<Option<String>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(
      ConfigError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
      }
      .into(),
    ),
  }
}

fn invalid(path: &Path, err: toml_edit::de::Error) -> SnapError {
  ConfigError::Invalid {
    path: path.to_path_buf(),
    reason: err.to_string(),
  }
  .into()
}
