//! Main entry point for integration tests
//!
//! Run with: `cargo test --test integration_tests`
//!
//! The `common` module is loaded via `#[path]` from the integration module
//! to avoid duplicate module loading.

mod integration;

pub use integration::*;
