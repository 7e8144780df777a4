//! Flatten the channel map into display rows

use crate::channel_map::entry::ChannelInfo;
use crate::channel_map::tree::{ChannelMap, ChannelMapTree};
use serde::Serialize;

/// Shown when nothing is released to a channel
pub const NO_RELEASE: &str = "-";
/// Shown when a channel follows a less risky one
pub const TRACKING: &str = "^";

/// One line of the release table, all fields already formatted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseRow {
  pub track: String,
  pub arch: String,
  pub channel: String,
  #[serde(rename = "version")]
  pub version_display: String,
  #[serde(rename = "revision")]
  pub revision_display: String,
  #[serde(rename = "expires_at")]
  pub expires_at_display: String,
}

impl ReleaseRow {
  /// True when the entry could not be interpreted and only the channel name is known
  pub fn is_bare(&self) -> bool {
    self.version_display.is_empty() && self.revision_display.is_empty() && self.expires_at_display.is_empty()
  }
}

/// Normalizer output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
  pub rows: Vec<ReleaseRow>,
  /// One message per entry that degraded to a bare row (or was dropped)
  pub warnings: Vec<String>,
  /// Whether the table needs an expiry column: set by any complete branch entry
  pub show_expiry: bool,
}

/// Flatten a raw channel map tree into ordered rows
///
/// Never fails: malformed entries become bare rows plus a warning each.
pub fn normalize(tree: &ChannelMapTree) -> Normalized {
  let map = ChannelMap::from_tree(tree);
  let mut out = Normalized {
    warnings: map.skipped.clone(),
    ..Normalized::default()
  };

  for track in &map.tracks {
    for arch in &track.arches {
      for entry in &arch.entries {
        if let Some(problem) = entry.problem() {
          out.warnings.push(problem.to_string());
        }

        if matches!(entry.info, ChannelInfo::Branch { .. }) {
          out.show_expiry = true;
        }

        let (version, revision, expires_at) = match &entry.info {
          ChannelInfo::None => (NO_RELEASE, NO_RELEASE, ""),
          ChannelInfo::Tracking => (TRACKING, TRACKING, ""),
          ChannelInfo::Specific { version, revision } => (version.as_str(), revision.as_str(), ""),
          ChannelInfo::Branch {
            version,
            revision,
            expires_at,
          } => (version.as_str(), revision.as_str(), expires_at.as_str()),
          ChannelInfo::Incomplete { .. } | ChannelInfo::Unknown(_) => ("", "", ""),
        };

        out.rows.push(ReleaseRow {
          track: track.track.clone(),
          arch: arch.arch.clone(),
          channel: entry.channel.clone(),
          version_display: version.to_string(),
          revision_display: revision.to_string(),
          expires_at_display: expires_at.to_string(),
        });
      }
    }
  }

  out
}
