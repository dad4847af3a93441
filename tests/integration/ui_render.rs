//! Rendering the app into a TestBackend and driving it with events

use crossterm::event::{KeyCode, MouseEventKind};
use valentine::notify::MockBehavior;
use valentine::wizard::Stage;

use super::common::fixtures::{app_with, click, ctrl, fill_card, key, mouse};
use super::common::terminal::{
    buffer_contains, create_test_terminal, create_test_terminal_sized, find_text, render_app,
};

#[test]
fn test_proposal_screen_renders() {
    let (mut app, _) = app_with(MockBehavior::Succeed);
    let mut terminal = create_test_terminal();

    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("Will you be my Valentine?"));
    assert!(screen.contains("Yes"));
    assert!(screen.contains("No"));
}

#[test]
fn test_hovering_decline_moves_it_once_per_entry() {
    let (mut app, _) = app_with(MockBehavior::Succeed);
    let mut terminal = create_test_terminal();
    render_app(&mut terminal, &mut app);

    let (x, y) = find_text(terminal.backend().buffer(), "No").expect("decline button drawn");
    app.handle_mouse_event(mouse(MouseEventKind::Moved, x, y));
    assert_eq!(app.wizard().hover().hover_count, 1);

    // Same spot again: either the button left, or the pointer never left it
    app.handle_mouse_event(mouse(MouseEventKind::Moved, x, y));
    assert_eq!(app.wizard().hover().hover_count, 1);
    assert_eq!(app.wizard().stage(), Stage::Proposal);

    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("Are you sure?"));
}

#[test]
fn test_clicking_yes_and_a_choice() {
    let (mut app, _) = app_with(MockBehavior::Succeed);
    let mut terminal = create_test_terminal();
    render_app(&mut terminal, &mut app);

    let (x, y) = find_text(terminal.backend().buffer(), "Yes").expect("accept button drawn");
    app.handle_mouse_event(click(x, y));
    assert_eq!(app.wizard().stage(), Stage::GameChoice);

    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("What do you want to play?"));
    let (x, y) = find_text(terminal.backend().buffer(), "Genshin").expect("option drawn");
    app.handle_mouse_event(click(x, y));
    assert_eq!(app.wizard().stage(), Stage::WatchChoice);

    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("Do you want to watch?"));
}

#[tokio::test]
async fn test_full_flow_renders_receipt_and_celebration() {
    let (mut app, notifier) = app_with(MockBehavior::Succeed);
    // Wide enough that the toast column clears the receipt text
    let mut terminal = create_test_terminal_sized(120, 30);

    fill_card(&mut app, "Ada", "2025-02-14T19:00", "ada@example.com");
    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("Your Name:"));
    assert!(screen.contains("ada@example.com"));

    app.handle_key_event(key(KeyCode::Enter));
    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("Sending..."));

    assert!(app.process_next_event().await);
    assert_eq!(app.wizard().stage(), Stage::Celebration);
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(notifier.sent()[0].date_time, "2/14/2025, 7:00:00 PM");

    let screen = render_app(&mut terminal, &mut app);
    assert!(screen.contains("ORDER #143-LOVEUMWA"));
    assert!(screen.contains("CUSTOMER: ADA"));
    assert!(screen.contains("SERVER: MAKI"));
    assert!(buffer_contains(terminal.backend().buffer(), "Receipt Sent!"));

    let (x, y) = find_text(terminal.backend().buffer(), "Close Receipt").expect("close hint drawn");
    app.handle_mouse_event(click(x + 2, y));
    assert!(!app.wizard().is_receipt_open());
    assert_eq!(app.wizard().stage(), Stage::Celebration);
    let screen = render_app(&mut terminal, &mut app);
    assert!(!screen.contains("ORDER #143-LOVEUMWA"));
    assert!(screen.contains("YAY! Happy Happy Happy!"));
    assert!(screen.contains("Receipt sent to ada@example.com!"));
}

#[test]
fn test_ctrl_q_quits_from_any_stage() {
    let (mut app, _) = app_with(MockBehavior::Succeed);
    app.handle_key_event(key(KeyCode::Char('y')));
    app.handle_key_event(ctrl('q'));
    assert!(app.should_quit());
}
