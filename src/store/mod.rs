//! Store API access
//!
//! The CLI only ever talks to the store through [`StoreClient`], so commands
//! can be exercised against an in-memory store in tests.

pub mod client;

pub use client::{HttpStoreClient, StoreClient};
