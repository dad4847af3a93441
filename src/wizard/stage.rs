/// One step of the card flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// "Will you be my Valentine?"
    #[default]
    Proposal,
    GameChoice,
    WatchChoice,
    /// Name, date and email
    ContactForm,
    /// Final reveal; the receipt lives here
    Celebration,
}

impl Stage {
    /// Position in the flow, 0 through 4
    pub fn index(self) -> u8 {
        match self {
            Stage::Proposal => 0,
            Stage::GameChoice => 1,
            Stage::WatchChoice => 2,
            Stage::ContactForm => 3,
            Stage::Celebration => 4,
        }
    }

    /// Heading shown for the stage
    pub fn title(self) -> &'static str {
        match self {
            Stage::Proposal => "Will you be my Valentine?",
            Stage::GameChoice => "What do you want to play?",
            Stage::WatchChoice => "Do you want to watch?",
            Stage::ContactForm => "Last Step! 💌",
            Stage::Celebration => "YAY! Happy Happy Happy! 💖",
        }
    }
}
