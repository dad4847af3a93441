//! Stacked, self-expiring notices in the top-right corner

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::palette;
use crate::notify::{Notice, NoticeLevel, NoticeSink};

const TOAST_WIDTH: u16 = 42;
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone)]
struct Toast {
    notice: Notice,
    expires_at: Instant,
}

/// Live toasts, newest first
#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, notice: Notice, now: Instant) {
        let expires_at = now + notice.level.duration();
        self.toasts.push_front(Toast { notice, expires_at });
        self.toasts.truncate(MAX_VISIBLE);
    }

    /// Drop toasts whose time is up
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Dismiss every toast
    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.toasts.iter().map(|t| &t.notice)
    }

    /// Time left on the newest toast
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .front()
            .map(|t| t.expires_at.saturating_duration_since(now))
    }
}

impl NoticeSink for ToastStack {
    fn notice(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }
}

fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => palette::SUCCESS,
        NoticeLevel::Warning => palette::WARNING,
        NoticeLevel::Error => palette::ERROR,
    }
}

/// Renders a [`ToastStack`]
pub struct ToastView<'a> {
    stack: &'a ToastStack,
}

impl<'a> ToastView<'a> {
    pub fn new(stack: &'a ToastStack) -> Self {
        Self { stack }
    }
}

impl Widget for ToastView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.right().saturating_sub(width + 1).max(area.x);
        let mut y = area.y + 1;

        for toast in &self.stack.toasts {
            let height = if toast.notice.description.is_some() { 4 } else { 3 };
            if y + height > area.bottom() {
                break;
            }
            let rect = Rect::new(x, y, width, height);
            let color = level_color(toast.notice.level);

            Clear.render(rect, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(palette::PAPER));
            let inner = block.inner(rect);
            block.render(rect, buf);

            let mut lines = vec![Line::from(Span::styled(
                toast.notice.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))];
            if let Some(description) = &toast.notice.description {
                lines.push(Line::from(Span::styled(
                    description.clone(),
                    Style::default().fg(palette::TEXT),
                )));
            }
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(inner, buf);

            y += height;
        }
    }
}
