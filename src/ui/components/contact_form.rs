//! Last step: name, date and email, then send

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::button::Button;
use super::layout::{centered_row, line_at};
use super::palette;
use super::spinner::Spinner;
use super::text_input::TextInputState;
use crate::wizard::Stage;

const FIELD_WIDTH: u16 = 40;
const SUBMIT_LABEL: &str = "Send & Finish 💖";

/// Focusable elements of the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Date,
    Email,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Date,
        FormField::Email,
        FormField::Submit,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Name => "Your Name:",
            FormField::Date => "When are you free?",
            FormField::Email => "Email for your receipt:",
            FormField::Submit => "",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "e.g., maki",
            FormField::Date => "YYYY-MM-DDTHH:MM",
            FormField::Email => "cutemotlga@gmail.com",
            FormField::Submit => "",
        }
    }
}

/// Text inputs and focus for the form
#[derive(Debug, Clone, Default)]
pub struct ContactFormState {
    pub name: TextInputState,
    pub date: TextInputState,
    pub email: TextInputState,
    pub focus: FormField,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, field: FormField) -> Option<&TextInputState> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::Date => Some(&self.date),
            FormField::Email => Some(&self.email),
            FormField::Submit => None,
        }
    }

    /// The focused text input, if focus is on one
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInputState> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Date => Some(&mut self.date),
            FormField::Email => Some(&mut self.email),
            FormField::Submit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFormLayout {
    pub heading: Rect,
    /// Label row and input box for name, date, email
    pub fields: [(Rect, Rect); 3],
    pub submit: Rect,
}

impl ContactFormLayout {
    pub fn compute(card: Rect) -> Self {
        let width = FIELD_WIDTH.min(card.width.saturating_sub(2));
        let x = card.x + card.width.saturating_sub(width) / 2;
        let top = card.y + 1;

        let field = |i: u16| {
            let y = top + 2 + i * 4;
            (Rect::new(x, y, width, 1), Rect::new(x, y + 1, width, 3))
        };
        let submit_width = Button::width_for(SUBMIT_LABEL).max(22);
        let submit = centered_row(card, top + 2 + 12, 3, &[submit_width], 0)[0];

        Self {
            heading: line_at(card, top),
            fields: [field(0), field(1), field(2)],
            submit,
        }
    }

    /// Form element under a point
    pub fn field_at(&self, x: u16, y: u16) -> Option<FormField> {
        let pos = (x, y).into();
        if self.submit.contains(pos) {
            return Some(FormField::Submit);
        }
        self.fields
            .iter()
            .position(|(_, input)| input.contains(pos))
            .map(|i| FormField::ALL[i])
    }
}

pub struct ContactFormView<'a> {
    layout: ContactFormLayout,
    state: &'a ContactFormState,
    sending: bool,
    spinner: &'a Spinner,
}

impl<'a> ContactFormView<'a> {
    pub fn new(
        layout: ContactFormLayout,
        state: &'a ContactFormState,
        sending: bool,
        spinner: &'a Spinner,
    ) -> Self {
        Self {
            layout,
            state,
            sending,
            spinner,
        }
    }
}

impl Widget for ContactFormView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        Paragraph::new(Stage::ContactForm.title())
            .style(
                Style::default()
                    .fg(palette::PINK)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .render(self.layout.heading, buf);

        for (field, (label_rect, input_rect)) in FormField::ALL.iter().zip(self.layout.fields) {
            let focused = !self.sending && self.state.focus == *field;
            Paragraph::new(Line::from(vec![
                Span::raw(field.label()),
                Span::styled(" *", Style::default().fg(palette::ERROR)),
            ]))
            .style(Style::default().fg(palette::TEXT))
            .alignment(Alignment::Center)
            .render(label_rect, buf);

            let border = if focused {
                palette::PINK
            } else {
                palette::PINK_SOFT
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(palette::PAPER));
            let inner = block.inner(input_rect);
            block.render(input_rect, buf);

            if let Some(input) = self.state.input(*field) {
                input.render(
                    inner,
                    buf,
                    Style::default().fg(palette::TEXT),
                    Some((field.placeholder(), Style::default().fg(palette::TEXT_MUTED))),
                    focused,
                );
            }
        }

        let label = if self.sending {
            Line::from(self.spinner.with_label("Sending...", Color::White))
        } else {
            Line::from(SUBMIT_LABEL)
        };
        Button::new(label, palette::PINK)
            .focused(!self.sending && self.state.focus == FormField::Submit)
            .render(self.layout.submit, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut focus = FormField::Name;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Submit);
    }

    #[test]
    fn test_submit_focus_has_no_input() {
        let mut state = ContactFormState::new();
        state.focus = FormField::Submit;
        assert!(state.focused_input_mut().is_none());
        state.focus = FormField::Email;
        state.focused_input_mut().unwrap().insert_char('a');
        assert_eq!(state.email.value(), "a");
    }

    #[test]
    fn test_field_hit_testing() {
        let layout = ContactFormLayout::compute(Rect::new(0, 0, 60, 22));
        let (_, date_box) = layout.fields[1];
        assert_eq!(layout.field_at(date_box.x + 1, date_box.y + 1), Some(FormField::Date));
        assert_eq!(
            layout.field_at(layout.submit.x, layout.submit.y),
            Some(FormField::Submit)
        );
        assert_eq!(layout.field_at(0, 0), None);
    }
}
