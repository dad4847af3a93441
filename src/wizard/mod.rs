//! The card's linear question flow.
//!
//! [`WizardController`] owns the current [`Stage`], the [`AnswerRecord`] and
//! the decline button's [`HoverState`]. Stages only move forward, one step
//! at a time, and only in response to explicit user actions.

mod answers;
mod controller;
mod evasive;
mod stage;

pub use answers::{format_date_time, AnswerRecord, Game, RequiredField, Watch};
pub use controller::{DeliveryOutcome, SubmitError, WizardController, DEFAULT_SENDER};
pub use evasive::{HoverState, DECLINE_PHRASES, EVADE_RANGE};
pub use stage::Stage;
