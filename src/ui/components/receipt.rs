//! The receipt overlay: a read-only summary styled like a till slip

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::dialog::{DialogFrame, InstructionBar};
use super::palette;
use crate::wizard::AnswerRecord;

const RECEIPT_WIDTH: u16 = 44;

fn rule(width: usize) -> Line<'static> {
    Line::from(Span::styled(
        "- ".repeat(width / 2),
        Style::default().fg(palette::PINK_SOFT),
    ))
}

fn row(label: &str, value: String, width: usize, value_style: Style) -> Line<'static> {
    let used = Span::raw(label).width() + Span::raw(value.as_str()).width();
    let gap = width.saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(palette::TEXT)),
        Span::raw(" ".repeat(gap)),
        Span::styled(value, value_style),
    ])
}

/// Receipt content for `answers`, laid out for `width` columns
pub fn receipt_lines(answers: &AnswerRecord, sender: &str, width: usize) -> Vec<Line<'static>> {
    let accent = Style::default().fg(palette::PINK).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(palette::TEXT_MUTED);
    let customer = if answers.name().is_empty() {
        "VALENTINE".to_string()
    } else {
        answers.name().to_uppercase()
    };

    vec![
        Line::from(Span::styled("R E C E I P T", accent)).centered(),
        Line::from(Span::styled("ORDER #143-LOVEUMWA", muted)).centered(),
        Line::default(),
        Line::from(vec![
            Span::styled("CUSTOMER: ", Style::default().fg(palette::TEXT)),
            Span::styled(customer, accent),
        ]),
        Line::from(vec![
            Span::styled("SERVER: ", Style::default().fg(palette::TEXT)),
            Span::styled(sender.to_uppercase(), accent),
        ]),
        rule(width),
        Line::from(Span::styled("Activities", Style::default().fg(palette::TEXT))).centered(),
        rule(width),
        row("Gaming", answers.game_label().to_string(), width, accent),
        row("Movie", answers.watch_label().to_string(), width, accent),
        row(
            "Date",
            answers.formatted_date().unwrap_or_else(|| "TBD".to_string()),
            width,
            accent,
        ),
        rule(width),
        row("TOTAL:", "MY HEART 💖".to_string(), width, accent),
        Line::default(),
        Line::from(Span::styled("*".repeat(width.min(35)), muted)).centered(),
        Line::from(Span::styled("NON-REFUNDABLE • LIFETIME WARRANTY", muted)).centered(),
        Line::from(Span::styled("*".repeat(width.min(35)), muted)).centered(),
        Line::from(Span::styled(format!("Sent with love by {sender} 💌"), muted)).centered(),
    ]
}

pub struct ReceiptDialog<'a> {
    answers: &'a AnswerRecord,
    sender: &'a str,
}

impl<'a> ReceiptDialog<'a> {
    pub fn new(answers: &'a AnswerRecord, sender: &'a str) -> Self {
        Self { answers, sender }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        // Padding (2 each side) plus borders
        let content_width = RECEIPT_WIDTH.saturating_sub(6) as usize;
        receipt_lines(self.answers, self.sender, content_width)
    }

    fn frame(&self, lines: usize) -> DialogFrame<'static> {
        DialogFrame::new("", RECEIPT_WIDTH, lines as u16 + 5)
            .border_color(palette::PINK)
            .background(palette::PAPER)
    }

    /// The clickable "Close Receipt" row when drawn inside `area`
    pub fn close_area(&self, area: Rect) -> Rect {
        let outer = self.frame(self.lines().len()).area(area);
        let inner = Rect {
            x: outer.x.saturating_add(1),
            y: outer.y.saturating_add(1),
            width: outer.width.saturating_sub(2),
            height: outer.height.saturating_sub(2),
        };
        footer(inner)
    }
}

fn footer(inner: Rect) -> Rect {
    Rect {
        y: inner.bottom().saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    }
}

impl Widget for ReceiptDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let inner = self.frame(lines.len()).render(area, buf);
        if inner.height < 2 || inner.width < 4 {
            return;
        }

        let body = Rect {
            x: inner.x + 2,
            y: inner.y + 1,
            width: inner.width.saturating_sub(4),
            height: inner.height.saturating_sub(3),
        };
        Paragraph::new(lines)
            .style(Style::default().bg(palette::PAPER))
            .alignment(Alignment::Left)
            .render(body, buf);

        InstructionBar::new(vec![("Esc", "Close Receipt")])
            .key_color(palette::PINK)
            .render(footer(inner), buf);
    }
}
