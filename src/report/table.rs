//! Plain-text release table

use crate::channel_map::ReleaseRow;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = ["Track", "Arch", "Channel", "Version", "Revision"];
const EXPIRY_HEADER: &str = "Expires at";

/// Minimum blank space after every header
const HEADER_PADDING: usize = 2;
const COLUMN_GAP: &str = "  ";

/// Lay out rows as a left-justified table
///
/// Track and Arch are only printed on the first row of each (track, arch) group.
/// Trailing blanks are trimmed, so a bare row ends right after its channel name.
pub fn render_table(rows: &[ReleaseRow], show_expiry: bool) -> String {
  let mut headers: Vec<&str> = HEADERS.to_vec();
  if show_expiry {
    headers.push(EXPIRY_HEADER);
  }

  let mut cells: Vec<Vec<&str>> = Vec::with_capacity(rows.len());
  let mut previous_group: Option<(&str, &str)> = None;
  for row in rows {
    let group = (row.track.as_str(), row.arch.as_str());
    let (track, arch) = if previous_group == Some(group) { ("", "") } else { group };
    previous_group = Some(group);

    let mut line = vec![
      track,
      arch,
      row.channel.as_str(),
      row.version_display.as_str(),
      row.revision_display.as_str(),
    ];
    if show_expiry {
      line.push(row.expires_at_display.as_str());
    }
    cells.push(line);
  }

  let widths: Vec<usize> = headers
    .iter()
    .enumerate()
    .map(|(col, header)| {
      cells
        .iter()
        .map(|line| line[col].width())
        .fold(header.width() + HEADER_PADDING, usize::max)
    })
    .collect();

  let mut out = String::new();
  for line in std::iter::once(&headers).chain(cells.iter()) {
    out.push_str(&format_line(line, &widths));
    out.push('\n');
  }
  out
}

fn format_line(line: &[&str], widths: &[usize]) -> String {
  let mut text = String::new();
  for (col, (cell, width)) in line.iter().zip(widths).enumerate() {
    if col > 0 {
      text.push_str(COLUMN_GAP);
    }
    text.push_str(cell);
    text.push_str(&" ".repeat(width.saturating_sub(cell.width())));
  }
  text.trim_end().to_string()
}
