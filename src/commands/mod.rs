//! CLI commands for snapcraft
//!
//! - **release**: release a revision to channels and print the resulting channel map

pub mod release;

pub use release::{ReleaseArgs, run_release};
