//! Channel map interpretation
//!
//! The store answers a release with a tree of track → series → architecture →
//! channel entries. This module turns that tree into an ordered list of
//! [`ReleaseRow`]s:
//!
//! - **entry**: classify a single channel entry (`none`, `tracking`, `specific`, `branch`)
//! - **tree**: impose display order (default track first, arches alphabetical)
//! - **normalize**: flatten into rows, collecting a warning for every malformed entry

pub mod entry;
pub mod normalize;
pub mod tree;

pub use normalize::{ReleaseRow, normalize};
pub use tree::ChannelMapTree;
