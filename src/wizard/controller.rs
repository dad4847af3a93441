use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use super::{AnswerRecord, Game, HoverState, RequiredField, Stage, Watch};
use crate::notify::{
    self, Notice, NoticeLevel, NoticeSink, NotificationPayload, Notifier, NotifyError,
};

/// Name signed on the receipt when none is configured
pub const DEFAULT_SENDER: &str = "Maki";

/// Why a submit attempt did not start
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("cannot submit from the {0:?} stage")]
    WrongStage(Stage),

    #[error("a submission is already in flight")]
    AlreadySending,

    #[error("missing required fields: {}", .0.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<RequiredField>),
}

/// How the outbound notification settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
}

impl From<Result<(), NotifyError>> for DeliveryOutcome {
    fn from(result: Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        }
    }
}

/// Owns the stage, the answers and the decline-button state for one session
#[derive(Debug, Clone)]
pub struct WizardController {
    stage: Stage,
    answers: AnswerRecord,
    hover: HoverState,
    sender: String,
    sending: bool,
    receipt_open: bool,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(DEFAULT_SENDER)
    }
}

impl WizardController {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            stage: Stage::Proposal,
            answers: AnswerRecord::new(),
            hover: HoverState::default(),
            sender: sender.into(),
            sending: false,
            receipt_open: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// A notification is in flight; submit is disabled until it settles
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_receipt_open(&self) -> bool {
        self.receipt_open
    }

    /// Current decline-button label
    pub fn decline_label(&self) -> &'static str {
        self.hover.label()
    }

    fn advance(&mut self, to: Stage) {
        debug_assert_eq!(to.index(), self.stage.index() + 1);
        tracing::info!(from = ?self.stage, to = ?to, "Stage advanced");
        self.stage = to;
    }

    /// "Yes" on the proposal. Returns whether the stage changed.
    pub fn accept(&mut self) -> bool {
        if self.stage != Stage::Proposal {
            return false;
        }
        self.advance(Stage::GameChoice);
        true
    }

    /// Hover or click on the decline button. Never changes the stage.
    ///
    /// Returns the new label, or `None` outside the proposal.
    pub fn evade<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'static str> {
        if self.stage != Stage::Proposal {
            return None;
        }
        self.hover.evade(rng);
        tracing::debug!(
            hover_count = self.hover.hover_count,
            x = self.hover.offset_x,
            y = self.hover.offset_y,
            "Decline button evaded"
        );
        Some(self.hover.label())
    }

    pub fn choose_game(&mut self, game: Game) -> bool {
        if self.stage != Stage::GameChoice {
            return false;
        }
        self.answers.set_game(game);
        self.advance(Stage::WatchChoice);
        true
    }

    pub fn choose_watch(&mut self, watch: Watch) -> bool {
        if self.stage != Stage::WatchChoice {
            return false;
        }
        self.answers.set_watch(watch);
        self.advance(Stage::ContactForm);
        true
    }

    fn form_editable(&self) -> bool {
        self.stage == Stage::ContactForm && !self.sending
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        if !self.form_editable() {
            return false;
        }
        self.answers.set_name(name);
        true
    }

    pub fn set_date(&mut self, date: impl Into<String>) -> bool {
        if !self.form_editable() {
            return false;
        }
        self.answers.set_date(date);
        true
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        if !self.form_editable() {
            return false;
        }
        self.answers.set_email(email);
        true
    }

    /// Validate the form and, if complete, mark the card as sending.
    ///
    /// On success the caller must deliver the returned payload and report
    /// back through [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(
        &mut self,
        sink: &mut dyn NoticeSink,
    ) -> Result<NotificationPayload, SubmitError> {
        if self.stage != Stage::ContactForm {
            return Err(SubmitError::WrongStage(self.stage));
        }
        if self.sending {
            return Err(SubmitError::AlreadySending);
        }

        let missing = self.answers.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Submit rejected");
            sink.notice(Notice::new(NoticeLevel::Warning, "Please fill in everything! 🥺"));
            return Err(SubmitError::MissingFields(missing));
        }

        self.sending = true;
        Ok(self.payload())
    }

    fn payload(&self) -> NotificationPayload {
        NotificationPayload {
            to_name: self.answers.name().to_string(),
            from_name: self.sender.clone(),
            to_email: self.answers.email().to_string(),
            game: self.answers.game_label().to_string(),
            watch: self.answers.watch_label().to_string(),
            date_time: self.answers.formatted_date().unwrap_or_default(),
        }
    }

    /// Settle an in-flight submission. Either outcome reaches the celebration.
    ///
    /// Returns false when nothing was in flight.
    pub fn finish_submit(
        &mut self,
        outcome: impl Into<DeliveryOutcome>,
        sink: &mut dyn NoticeSink,
    ) -> bool {
        if !self.sending {
            tracing::warn!("Ignoring notification result with no submission in flight");
            return false;
        }
        self.sending = false;

        match outcome.into() {
            DeliveryOutcome::Delivered => {
                sink.notice(
                    Notice::new(NoticeLevel::Success, "Receipt Sent! 📧")
                        .with_description(format!("Sent to {}", self.answers.email())),
                );
            }
            DeliveryOutcome::Failed(reason) => {
                tracing::error!(error = %reason, "Email Error");
                sink.notice(
                    Notice::new(NoticeLevel::Error, "Email failed... but I still love you!")
                        .with_description("Proceeding anyway! ❤️"),
                );
            }
        }

        self.advance(Stage::Celebration);
        self.receipt_open = true;
        true
    }

    /// Validate, send with a bounded wait, and settle, in one call.
    pub async fn submit(
        &mut self,
        notifier: &dyn Notifier,
        limit: Duration,
        sink: &mut dyn NoticeSink,
    ) -> Result<DeliveryOutcome, SubmitError> {
        let payload = self.begin_submit(sink)?;
        let outcome = DeliveryOutcome::from(notify::dispatch(notifier, &payload, limit).await);
        self.finish_submit(outcome.clone(), sink);
        Ok(outcome)
    }

    /// Show the receipt again. Only available after the celebration.
    pub fn open_receipt(&mut self) -> bool {
        if self.stage != Stage::Celebration {
            return false;
        }
        self.receipt_open = true;
        true
    }

    /// Hide the receipt; the stage is unaffected
    pub fn close_receipt(&mut self) {
        self.receipt_open = false;
    }
}
