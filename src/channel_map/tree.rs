//! Channel map tree: raw wire shape and its ordered, typed form

use crate::channel_map::entry::ChannelEntry;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Track used when a channel name carries no explicit track
pub const DEFAULT_TRACK: &str = "latest";

/// track -> risk level/series ("16") -> architecture -> entries, as the store sends it.
/// Only the track level is typed; everything below stays raw JSON so one malformed
/// bucket or entry cannot fail decoding of the whole tree.
pub type ChannelMapTree = BTreeMap<String, Value>;

/// The channel map with display order imposed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMap {
  pub tracks: Vec<TrackGroup>,
  /// One message per bucket or entry that was dropped
  pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup {
  pub track: String,
  pub arches: Vec<ArchGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchGroup {
  pub arch: String,
  /// Source order, which is the channel hierarchy: stable, candidate, beta, edge, then branches
  pub entries: Vec<ChannelEntry>,
}

impl ChannelMap {
  /// Build the ordered form in a single pass over the raw tree
  pub fn from_tree(tree: &ChannelMapTree) -> Self {
    let mut tracks: Vec<(&String, &Value)> = tree.iter().collect();
    tracks.sort_by(|a, b| track_order(a.0, b.0));

    let mut skipped = Vec::new();
    let mut groups = Vec::new();
    for (track, series_buckets) in tracks {
      let Some(series_buckets) = series_buckets.as_object() else {
        skipped.push(format!(
          "Skipping track {}: expected series buckets, got {}",
          track, series_buckets
        ));
        continue;
      };

      let mut series_buckets: Vec<(&String, &Value)> = series_buckets.iter().collect();
      series_buckets.sort_by(|a, b| a.0.cmp(b.0));

      // Arches from every series bucket, merged and sorted
      let mut arches: BTreeMap<&str, Vec<ChannelEntry>> = BTreeMap::new();
      for (series, arch_buckets) in series_buckets {
        let Some(arch_buckets) = arch_buckets.as_object() else {
          skipped.push(format!(
            "Skipping series {} of track {}: expected architectures, got {}",
            series, track, arch_buckets
          ));
          continue;
        };

        for (arch, raw_entries) in arch_buckets {
          let Some(raw_entries) = raw_entries.as_array() else {
            skipped.push(format!(
              "Skipping architecture {}/{}: expected a list of channels, got {}",
              track, arch, raw_entries
            ));
            continue;
          };

          let entries = arches.entry(arch.as_str()).or_default();
          for raw in raw_entries {
            match ChannelEntry::from_value(raw) {
              Some(entry) => entries.push(entry),
              None => skipped.push(format!(
                "Skipping channel entry without a channel name in {}/{}: {}",
                track, arch, raw
              )),
            }
          }
        }
      }

      groups.push(TrackGroup {
        track: track.clone(),
        arches: arches
          .into_iter()
          .map(|(arch, entries)| ArchGroup {
            arch: arch.to_string(),
            entries,
          })
          .collect(),
      });
    }

    Self {
      tracks: groups,
      skipped,
    }
  }
}

/// The default track sorts first, everything else alphabetically
pub fn track_order(a: &str, b: &str) -> Ordering {
  match (a == DEFAULT_TRACK, b == DEFAULT_TRACK) {
    (true, true) => Ordering::Equal,
    (true, false) => Ordering::Less,
    (false, true) => Ordering::Greater,
    (false, false) => a.cmp(b),
  }
}
