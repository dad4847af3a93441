//! Two-option question screen (game, then what to watch)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

use super::button::Button;
use super::layout::{centered_row, line_at};
use super::palette;

const OPTION_WIDTH: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceLayout {
    pub icon: Rect,
    pub heading: Rect,
    pub options: [Rect; 2],
}

impl ChoiceLayout {
    pub fn compute(card: Rect) -> Self {
        let mid = card.y + card.height / 2;
        let row = centered_row(card, mid + 1, 3, &[OPTION_WIDTH, OPTION_WIDTH], 4);
        Self {
            icon: line_at(card, mid.saturating_sub(3)),
            heading: line_at(card, mid.saturating_sub(1)),
            options: [row[0], row[1]],
        }
    }

    /// Index of the option under a point
    pub fn option_at(&self, x: u16, y: u16) -> Option<usize> {
        self.options
            .iter()
            .position(|r| r.contains((x, y).into()))
    }
}

pub struct ChoiceView<'a> {
    layout: ChoiceLayout,
    icon: &'a str,
    heading: &'a str,
    options: [(&'a str, Color); 2],
    focus: usize,
}

impl<'a> ChoiceView<'a> {
    pub fn new(
        layout: ChoiceLayout,
        icon: &'a str,
        heading: &'a str,
        options: [(&'a str, Color); 2],
        focus: usize,
    ) -> Self {
        Self {
            layout,
            icon,
            heading,
            options,
            focus,
        }
    }
}

impl Widget for ChoiceView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.icon)
            .alignment(Alignment::Center)
            .render(self.layout.icon, buf);
        Paragraph::new(self.heading)
            .style(
                Style::default()
                    .fg(palette::PINK)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .render(self.layout.heading, buf);

        for (i, ((label, color), rect)) in self
            .options
            .iter()
            .zip(self.layout.options.iter())
            .enumerate()
        {
            Button::new(*label, *color)
                .focused(i == self.focus)
                .render(*rect, buf);
        }
    }
}
