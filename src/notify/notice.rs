use std::time::Duration;

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// How long a notice of this level stays on screen
    pub fn duration(self) -> Duration {
        match self {
            NoticeLevel::Success => Duration::from_secs(5),
            NoticeLevel::Warning | NoticeLevel::Error => Duration::from_secs(3),
        }
    }
}

/// A transient, user-visible notice (a toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Destination for notices raised by the wizard.
///
/// The UI implements this with its toast stack; tests collect into a `Vec`.
pub trait NoticeSink {
    fn notice(&mut self, notice: Notice);
}

impl NoticeSink for Vec<Notice> {
    fn notice(&mut self, notice: Notice) {
        self.push(notice);
    }
}
