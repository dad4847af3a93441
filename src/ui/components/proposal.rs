//! "Will you be my Valentine?" with a Yes button and a decline button that
//! runs away.

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use super::button::Button;
use super::layout::{centered_row, keep_inside, line_at};
use super::palette;
use super::picture::Picture;
use crate::wizard::{HoverState, Stage};

/// Offset units per terminal column
const UNITS_PER_COL: f32 = 8.0;
/// Offset units per terminal row (cells are about twice as tall as wide)
const UNITS_PER_ROW: f32 = 16.0;

pub const ACCEPT_LABEL: &str = "Yes 🥰";

/// Which proposal button has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposalFocus {
    #[default]
    Accept,
    Decline,
}

impl ProposalFocus {
    pub fn toggle(self) -> Self {
        match self {
            ProposalFocus::Accept => ProposalFocus::Decline,
            ProposalFocus::Decline => ProposalFocus::Accept,
        }
    }
}

/// Where each proposal element lands on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalLayout {
    pub image: Option<Rect>,
    pub heading: Rect,
    pub accept: Rect,
    pub decline: Rect,
}

impl ProposalLayout {
    /// Lay out inside `card`; the decline button may wander anywhere on `screen`
    pub fn compute(
        screen: Rect,
        card: Rect,
        has_image: bool,
        hover: &HoverState,
        decline_label: &str,
    ) -> Self {
        let buttons_y = card.bottom().saturating_sub(4);
        let heading_y = buttons_y.saturating_sub(2);
        let image = has_image.then(|| Rect {
            x: card.x,
            y: card.y,
            width: card.width,
            height: heading_y.saturating_sub(card.y + 1),
        });

        let accept_width = Button::width_for(ACCEPT_LABEL).max(12);
        let decline_width = Button::width_for(decline_label).max(12);
        let row = centered_row(card, buttons_y, 3, &[accept_width, decline_width], 4);

        let dx = (hover.offset_x / UNITS_PER_COL).round() as i32;
        let dy = (hover.offset_y / UNITS_PER_ROW).round() as i32;
        let moved = Rect {
            x: (i32::from(row[1].x) + dx).max(0) as u16,
            y: (i32::from(row[1].y) + dy).max(0) as u16,
            ..row[1]
        };

        Self {
            image,
            heading: line_at(card, heading_y),
            accept: row[0],
            decline: keep_inside(moved, screen),
        }
    }
}

pub struct ProposalView<'a> {
    layout: ProposalLayout,
    image: Option<&'a RgbaImage>,
    decline_label: &'a str,
    focus: ProposalFocus,
}

impl<'a> ProposalView<'a> {
    pub fn new(
        layout: ProposalLayout,
        image: Option<&'a RgbaImage>,
        decline_label: &'a str,
        focus: ProposalFocus,
    ) -> Self {
        Self {
            layout,
            image,
            decline_label,
            focus,
        }
    }
}

impl Widget for ProposalView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        if let (Some(rect), Some(image)) = (self.layout.image, self.image) {
            Picture::new(image).render(rect, buf);
        }

        Paragraph::new(Stage::Proposal.title())
            .style(
                Style::default()
                    .fg(palette::PINK)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .render(self.layout.heading, buf);

        Button::new(ACCEPT_LABEL, palette::PINK)
            .focused(self.focus == ProposalFocus::Accept)
            .render(self.layout.accept, buf);
        Button::new(self.decline_label, palette::TEXT_MUTED)
            .outline()
            .focused(self.focus == ProposalFocus::Decline)
            .render(self.layout.decline, buf);
    }
}
