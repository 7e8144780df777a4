//! A single channel status entry as reported by the store

use serde_json::Value;
use std::fmt;

/// What the store knows about one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelInfo {
  /// Nothing released
  None,
  /// Follows the next less risky channel
  Tracking,
  /// A revision released directly to this channel
  Specific { version: String, revision: String },
  /// A revision released to a temporary branch
  Branch {
    version: String,
    revision: String,
    expires_at: String,
  },
  /// `specific` or `branch` without all of their fields
  Incomplete { info: String, missing: Vec<&'static str> },
  /// An `info` value this client does not understand
  Unknown(String),
}

impl ChannelInfo {
  /// Classify the raw `info` value together with the fields it requires
  fn classify(entry: &Value) -> Self {
    let info = match entry.get("info") {
      Some(Value::String(s)) => s.clone(),
      Some(other) => other.to_string(),
      None => String::new(),
    };

    match info.as_str() {
      "none" => ChannelInfo::None,
      "tracking" => ChannelInfo::Tracking,
      "specific" => match (string_field(entry, "version"), revision_field(entry)) {
        (Some(version), Some(revision)) => ChannelInfo::Specific { version, revision },
        (version, revision) => ChannelInfo::Incomplete {
          info: info.clone(),
          missing: missing_fields(&[("version", version.is_none()), ("revision", revision.is_none())]),
        },
      },
      "branch" => match (
        string_field(entry, "version"),
        revision_field(entry),
        timestamp_field(entry, "expires_at"),
      ) {
        (Some(version), Some(revision), Some(expires_at)) => ChannelInfo::Branch {
          version,
          revision,
          expires_at,
        },
        (version, revision, expires_at) => ChannelInfo::Incomplete {
          info: info.clone(),
          missing: missing_fields(&[
            ("version", version.is_none()),
            ("revision", revision.is_none()),
            ("expires_at", expires_at.is_none()),
          ]),
        },
      },
      _ => ChannelInfo::Unknown(info.clone()),
    }
  }
}

/// One channel row of the raw channel map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
  pub channel: String,
  pub info: ChannelInfo,
}

impl ChannelEntry {
  /// Parse a raw JSON entry. Returns `None` only when there is no channel name to report.
  pub fn from_value(value: &Value) -> Option<Self> {
    let channel = value.get("channel").and_then(Value::as_str)?;
    Some(Self {
      channel: channel.to_string(),
      info: ChannelInfo::classify(value),
    })
  }

  /// Why this entry cannot be displayed, if it cannot
  pub fn problem(&self) -> Option<EntryProblem<'_>> {
    match &self.info {
      ChannelInfo::Unknown(info) => Some(EntryProblem::UnexpectedInfo {
        info,
        channel: &self.channel,
      }),
      ChannelInfo::Incomplete { info, missing } => Some(EntryProblem::MissingFields {
        info,
        missing,
        channel: &self.channel,
      }),
      _ => None,
    }
  }
}

/// A reason an entry degrades to a bare row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryProblem<'a> {
  UnexpectedInfo {
    info: &'a str,
    channel: &'a str,
  },
  MissingFields {
    info: &'a str,
    missing: &'a [&'static str],
    channel: &'a str,
  },
}

impl fmt::Display for EntryProblem<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EntryProblem::UnexpectedInfo { info, channel } => {
        write!(f, "Unexpected channel info: '{}' in channel {}", info, channel)
      }
      EntryProblem::MissingFields { info, missing, channel } => {
        write!(
          f,
          "Missing {} for '{}' channel info in channel {}",
          missing.join(", "),
          info,
          channel
        )
      }
    }
  }
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
  entry.get(key).and_then(Value::as_str).map(str::to_string)
}

// A blank timestamp has nothing to display, so it counts as missing
fn timestamp_field(entry: &Value, key: &str) -> Option<String> {
  string_field(entry, key).filter(|value| !value.trim().is_empty())
}

// Revisions are integers on the wire; tolerate stringified ones
fn revision_field(entry: &Value) -> Option<String> {
  match entry.get("revision")? {
    Value::Number(n) if n.is_u64() => Some(n.to_string()),
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    _ => None,
  }
}

fn missing_fields(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
  checks.iter().filter(|(_, missing)| *missing).map(|(name, _)| *name).collect()
}
