//! Event builders and small fixtures

use std::path::Path;
use std::sync::Arc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use image::{Rgba, RgbaImage};
use valentine::notify::{MockBehavior, RecordingNotifier};
use valentine::{App, Config};

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

pub fn click(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// App wired to a recording notifier
pub fn app_with(behavior: MockBehavior) -> (App, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new(behavior));
    let app = App::with_notifier(Config::default(), notifier.clone());
    (app, notifier)
}

/// Drive an app from the proposal to a filled-in contact form
pub fn fill_card(app: &mut App, name: &str, date: &str, email: &str) {
    app.handle_key_event(key(KeyCode::Char('y')));
    app.handle_key_event(key(KeyCode::Char('1')));
    app.handle_key_event(key(KeyCode::Char('2')));
    type_text(app, name);
    app.handle_key_event(key(KeyCode::Tab));
    type_text(app, date);
    app.handle_key_event(key(KeyCode::Tab));
    type_text(app, email);
    app.handle_key_event(key(KeyCode::Tab));
}

/// Left half pure green, right half red
pub fn write_split_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 255, 0, 255])
        } else {
            Rgba([255, 0, 0, 255])
        }
    });
    img.save(path).expect("Failed to write fixture image");
}
