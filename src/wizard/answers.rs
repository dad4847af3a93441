use chrono::NaiveDateTime;

/// Game picked on the second screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    Valorant,
    Genshin,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::Valorant, Game::Genshin];

    pub fn as_str(self) -> &'static str {
        match self {
            Game::Valorant => "Valorant",
            Game::Genshin => "Genshin",
        }
    }
}

/// What to watch, picked on the third screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Series,
    Movies,
}

impl Watch {
    pub const ALL: [Watch; 2] = [Watch::Series, Watch::Movies];

    pub fn as_str(self) -> &'static str {
        match self {
            Watch::Series => "Series",
            Watch::Movies => "Movies",
        }
    }
}

/// Fields that must be filled before the card can be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Date,
    Email,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Date => "date",
            RequiredField::Email => "email",
        }
    }
}

/// Everything collected during one session.
///
/// Game and watch are written only by the controller, once each, from the
/// matching stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    name: String,
    game: Option<Game>,
    watch: Option<Watch>,
    date: String,
    email: String,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> Option<Game> {
        self.game
    }

    pub fn watch(&self) -> Option<Watch> {
        self.watch
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Game as text, empty when unset
    pub fn game_label(&self) -> &'static str {
        self.game.map(Game::as_str).unwrap_or("")
    }

    /// Watch choice as text, empty when unset
    pub fn watch_label(&self) -> &'static str {
        self.watch.map(Watch::as_str).unwrap_or("")
    }

    /// Date rendered for display, or `None` when not picked yet
    pub fn formatted_date(&self) -> Option<String> {
        if self.date.is_empty() {
            None
        } else {
            Some(format_date_time(&self.date))
        }
    }

    /// Required fields that are still empty, in form order
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.date.is_empty() {
            missing.push(RequiredField::Date);
        }
        if self.email.is_empty() {
            missing.push(RequiredField::Email);
        }
        missing
    }

    pub(super) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(super) fn set_game(&mut self, game: Game) {
        self.game = Some(game);
    }

    pub(super) fn set_watch(&mut self, watch: Watch) {
        self.watch = Some(watch);
    }

    pub(super) fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub(super) fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }
}

const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Render a `datetime-local` style value as `M/D/YYYY, h:mm:ss AM`.
///
/// Values that don't parse are returned unchanged.
pub fn format_date_time(raw: &str) -> String {
    let trimmed = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
        .unwrap_or_else(|| raw.to_string())
}
