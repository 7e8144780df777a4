mod channel_map;
mod commands;
mod core;
mod report;
mod store;

use clap::{Parser, Subcommand};
use crate::core::error::{SnapError, print_error};
use crate::core::logging::LogLevel;

/// Publish snaps to the store
#[derive(Parser)]
#[command(name = "snapcraft")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Log verbosity (RUST_LOG takes precedence)
  #[arg(long, global = true, value_enum, default_value = "warn")]
  log_level: LogLevel,

  /// Store API base URL (overrides config.toml)
  #[arg(long, global = true, env = "SNAPCRAFT_STORE_URL")]
  store_url: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Release a revision to one or more channels
  Release {
    /// Name of the snap
    snap_name: String,
    /// Revision to release
    revision: String,
    /// Channels to release to (e.g. beta, 2.1/stable, stable/hotfix1)
    #[arg(required = true)]
    channels: Vec<String>,
    /// Output the channel map in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(e) = crate::core::logging::init(cli.log_level) {
    handle_error(e);
  }

  let result = match cli.command {
    Commands::Release {
      snap_name,
      revision,
      channels,
      json,
    } => commands::run_release(commands::ReleaseArgs {
      snap_name,
      revision,
      channels,
      store_url: cli.store_url,
      json,
    }),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: SnapError) -> ! {
  tracing::debug!(exit_code = err.exit_code().as_i32(), "Command failed");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
