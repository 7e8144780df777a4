//! Integration tests for the snapcraft binary

mod helpers;
