//! Shared test utilities
//!
//! - Key and mouse event builders plus a ready-made app
//! - TUI terminal testing helpers
//! - Image fixtures

pub mod fixtures;
pub mod terminal;
