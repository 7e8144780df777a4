//! Release report: the channel table followed by the opened-channel summary

pub mod summary;
pub mod table;

use crate::channel_map::ReleaseRow;

pub use summary::{highlight, opened_channels_summary};
pub use table::render_table;

/// Full text report for a release
pub fn render(rows: &[ReleaseRow], opened: &[String], show_expiry: bool) -> String {
  let mut out = render_table(rows, show_expiry);
  if let Some(summary) = opened_channels_summary(opened) {
    out.push_str(&highlight(&summary));
    out.push('\n');
  }
  out
}
