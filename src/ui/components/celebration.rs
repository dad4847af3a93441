//! Final screen: keyed video, cheering, and a link to the receipt

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use super::layout::line_at;
use super::palette;
use super::picture::Picture;
use crate::wizard::Stage;

pub const RECEIPT_LINK: &str = "View Receipt 🧾";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationLayout {
    pub video: Rect,
    pub heading: Rect,
    pub sent_to: Rect,
    pub receipt_link: Rect,
}

impl CelebrationLayout {
    pub fn compute(card: Rect) -> Self {
        let link_y = card.bottom().saturating_sub(2);
        let sent_y = link_y.saturating_sub(2);
        let heading_y = sent_y.saturating_sub(1);
        let link_width = ratatui::text::Line::from(RECEIPT_LINK).width() as u16;
        Self {
            video: Rect {
                x: card.x,
                y: card.y + 1,
                width: card.width,
                height: heading_y.saturating_sub(card.y + 2),
            },
            heading: line_at(card, heading_y),
            sent_to: line_at(card, sent_y),
            receipt_link: Rect::new(
                card.x + card.width.saturating_sub(link_width) / 2,
                link_y,
                link_width.min(card.width),
                1,
            ),
        }
    }
}

pub struct CelebrationView<'a> {
    layout: CelebrationLayout,
    frame: Option<&'a RgbaImage>,
    email: &'a str,
}

impl<'a> CelebrationView<'a> {
    pub fn new(layout: CelebrationLayout, frame: Option<&'a RgbaImage>, email: &'a str) -> Self {
        Self {
            layout,
            frame,
            email,
        }
    }
}

impl Widget for CelebrationView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        if let Some(frame) = self.frame {
            Picture::new(frame).render(self.layout.video, buf);
        }

        Paragraph::new(Stage::Celebration.title())
            .style(
                Style::default()
                    .fg(palette::PINK)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .render(self.layout.heading, buf);
        Paragraph::new(format!("Receipt sent to {}!", self.email))
            .style(Style::default().fg(palette::TEXT_MUTED))
            .alignment(Alignment::Center)
            .render(self.layout.sent_to, buf);
        Paragraph::new(RECEIPT_LINK)
            .style(
                Style::default()
                    .fg(palette::PINK)
                    .add_modifier(Modifier::UNDERLINED),
            )
            .render(self.layout.receipt_link, buf);
    }
}
