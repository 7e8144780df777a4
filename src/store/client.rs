//! HTTP client for the store release endpoint

use crate::channel_map::ChannelMapTree;
use crate::core::config::{Credentials, StoreConfig};
use crate::core::error::{AuthError, SnapResult, StoreError};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const RELEASE_PATH: &str = "/dev/api/snap-release/";

/// What the store reports after a release
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseResponse {
  /// Channels whose content changed because of this release, in store order
  #[serde(default)]
  pub opened_channels: Vec<String>,
  #[serde(default)]
  pub channel_map_tree: ChannelMapTree,
}

/// Operations the CLI needs from the store
pub trait StoreClient {
  /// Release `revision` of `snap_name` into `channels`
  fn release(&self, snap_name: &str, revision: &str, channels: &[String]) -> SnapResult<ReleaseResponse>;
}

#[derive(Serialize)]
struct ReleaseRequest<'a> {
  name: &'a str,
  revision: &'a str,
  channels: &'a [String],
}

#[derive(Deserialize)]
struct ErrorBody {
  #[serde(default)]
  error_list: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
  message: String,
}

/// Blocking HTTP client for the store API
pub struct HttpStoreClient {
  http: Client,
  base_url: String,
  credentials: Credentials,
}

impl HttpStoreClient {
  pub fn new(config: &StoreConfig, credentials: Credentials) -> SnapResult<Self> {
    let http = Client::builder()
      .timeout(config.timeout())
      .user_agent(concat!("snapcraft/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self {
      http,
      base_url: config.store_url.trim_end_matches('/').to_string(),
      credentials,
    })
  }

  fn release_url(&self) -> String {
    format!("{}{}", self.base_url, RELEASE_PATH)
  }
}

impl StoreClient for HttpStoreClient {
  fn release(&self, snap_name: &str, revision: &str, channels: &[String]) -> SnapResult<ReleaseResponse> {
    let url = self.release_url();
    tracing::debug!(%url, snap_name, revision, ?channels, "Requesting release");

    let response = self
      .http
      .post(&url)
      .header(reqwest::header::AUTHORIZATION, self.credentials.authorization_header())
      .json(&ReleaseRequest {
        name: snap_name,
        revision,
        channels,
      })
      .send()?;

    let status = response.status();
    let body = response.text()?;
    tracing::debug!(status = status.as_u16(), bytes = body.len(), "Store responded");

    if status.is_success() {
      return serde_json::from_str(&body).map_err(|e| {
        StoreError::InvalidResponse {
          message: e.to_string(),
        }
        .into()
      });
    }

    let messages = error_messages(&body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
      return Err(
        AuthError::Rejected {
          message: messages.join("\n"),
        }
        .into(),
      );
    }

    Err(
      StoreError::Api {
        status: status.as_u16(),
        messages,
      }
      .into(),
    )
  }
}

/// Messages from a store error body; the raw body when it has no `error_list`
fn error_messages(body: &str) -> Vec<String> {
  match serde_json::from_str::<ErrorBody>(body) {
    Ok(parsed) if !parsed.error_list.is_empty() => parsed.error_list.into_iter().map(|e| e.message).collect(),
    _ if body.trim().is_empty() => Vec::new(),
    _ => vec![body.trim().to_string()],
  }
}
