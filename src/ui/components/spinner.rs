use ratatui::{
    style::{Color, Style},
    text::Span,
};

const HEARTBEAT: [&str; 4] = ["♡", "♥", "♥", "♡"];

/// Beating-heart spinner for the sending state
pub struct Spinner {
    tick: usize,
}

impl Spinner {
    pub fn heartbeat() -> Self {
        Self { tick: 0 }
    }

    /// Advance to the next frame
    pub fn tick(&mut self) {
        self.tick = (self.tick + 1) % HEARTBEAT.len();
    }

    pub fn frame(&self) -> &'static str {
        HEARTBEAT[self.tick % HEARTBEAT.len()]
    }

    /// Current frame followed by a label
    pub fn with_label(&self, label: &str, color: Color) -> Vec<Span<'static>> {
        vec![
            Span::styled(self.frame().to_string(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(label.to_string(), Style::default().fg(color)),
        ]
    }
}
