//! Integration tests for the Valentine card
//!
//! These tests drive the wizard, the notifier, the compositor and the UI
//! together the way the binary does.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod compositor;
pub mod ui_render;
pub mod wizard_flow;
