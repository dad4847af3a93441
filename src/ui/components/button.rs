use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::palette;

/// A bordered, three-row button
pub struct Button<'a> {
    label: Line<'a>,
    color: Color,
    focused: bool,
    outline: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: impl Into<Line<'a>>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            focused: false,
            outline: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Border only, no fill
    pub fn outline(mut self) -> Self {
        self.outline = true;
        self
    }

    /// Width that fits `label` with padding and borders
    pub fn width_for(label: &str) -> u16 {
        Line::from(label).width() as u16 + 6
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let (fill, text) = if self.outline {
            (palette::PAPER, self.color)
        } else {
            (self.color, Color::White)
        };
        let mut border = Style::default().fg(self.color).bg(fill);
        if self.focused {
            border = border.add_modifier(Modifier::BOLD);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border)
            .style(Style::default().bg(fill));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut label_style = Style::default().fg(text).bg(fill).add_modifier(Modifier::BOLD);
        if self.focused {
            label_style = label_style.add_modifier(Modifier::UNDERLINED);
        }
        Paragraph::new(self.label)
            .style(label_style)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
