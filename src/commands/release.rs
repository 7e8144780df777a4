//! Release command implementation
//!
//! Releases a revision to one or more channels, then prints the channel map
//! the store reports back. Malformed channel entries are logged and rendered
//! as bare rows; they never fail the command.

use crate::channel_map::{ReleaseRow, normalize};
use crate::core::config::{self, Credentials, StoreConfig};
use crate::core::error::{ResultExt, SnapError, SnapResult};
use crate::report;
use crate::store::{HttpStoreClient, StoreClient};
use serde::Serialize;

/// Arguments of `snapcraft release`
#[derive(Debug, Clone)]
pub struct ReleaseArgs {
  pub snap_name: String,
  pub revision: String,
  pub channels: Vec<String>,
  pub store_url: Option<String>,
  pub json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  opened_channels: &'a [String],
  rows: &'a [ReleaseRow],
}

/// Run the release command against the configured store
pub fn run_release(args: ReleaseArgs) -> SnapResult<()> {
  validate_revision(&args.revision)?;

  let dir = config::config_dir()?;
  let credentials = Credentials::load(&dir)?;
  let config = StoreConfig::load(&dir)?.with_store_url(args.store_url.clone());
  let client = HttpStoreClient::new(&config, credentials)?;

  let output = release_report(&client, &args)?;
  print!("{}", output);
  Ok(())
}

/// Perform the release and build the text (or JSON) to print
pub fn release_report(client: &dyn StoreClient, args: &ReleaseArgs) -> SnapResult<String> {
  let response = client.release(&args.snap_name, &args.revision, &args.channels)?;
  let normalized = normalize(&response.channel_map_tree);

  for warning in &normalized.warnings {
    tracing::error!("{}", warning);
  }
  tracing::info!(
    snap = %args.snap_name,
    revision = %args.revision,
    rows = normalized.rows.len(),
    degraded = normalized.rows.iter().filter(|row| row.is_bare()).count(),
    opened = response.opened_channels.len(),
    "Release completed"
  );

  if args.json {
    let report = JsonReport {
      opened_channels: &response.opened_channels,
      rows: &normalized.rows,
    };
    let mut text = serde_json::to_string_pretty(&report).context("Failed to serialize release report")?;
    text.push('\n');
    return Ok(text);
  }

  Ok(report::render(
    &normalized.rows,
    &response.opened_channels,
    normalized.show_expiry,
  ))
}

fn validate_revision(revision: &str) -> SnapResult<()> {
  if !revision.is_empty() && revision.chars().all(|c| c.is_ascii_digit()) {
    return Ok(());
  }
  Err(SnapError::with_help(
    format!("Invalid revision '{}'", revision),
    "Revisions are positive integers, as listed by the store for your snap.",
  ))
}
