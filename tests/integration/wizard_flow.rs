//! End-to-end runs of the wizard with a recording notifier

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use valentine::notify::{MockBehavior, Notice, NoticeLevel, RecordingNotifier};
use valentine::wizard::{DeliveryOutcome, Game, Stage, Watch, WizardController};

fn complete_card(wizard: &mut WizardController) {
    assert!(wizard.accept());
    assert!(wizard.choose_game(Game::Valorant));
    assert!(wizard.choose_watch(Watch::Movies));
    assert!(wizard.set_name("Ada"));
    assert!(wizard.set_date("2025-02-14T19:00"));
    assert!(wizard.set_email("ada@example.com"));
}

#[tokio::test]
async fn test_happy_path_sends_one_notification() {
    let notifier = RecordingNotifier::new(MockBehavior::Succeed);
    let mut notices: Vec<Notice> = Vec::new();
    let mut wizard = WizardController::default();

    complete_card(&mut wizard);
    let outcome = wizard
        .submit(&notifier, Duration::from_secs(10), &mut notices)
        .await
        .expect("submit should start");

    assert_eq!(outcome, DeliveryOutcome::Delivered);
    assert_eq!(wizard.stage(), Stage::Celebration);
    assert_eq!(wizard.stage().index(), 4);
    assert!(wizard.is_receipt_open());

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_name, "Ada");
    assert_eq!(sent[0].from_name, "Maki");
    assert_eq!(sent[0].to_email, "ada@example.com");
    assert_eq!(sent[0].game, "Valorant");
    assert_eq!(sent[0].watch, "Movies");
    assert_eq!(sent[0].date_time, "2/14/2025, 7:00:00 PM");

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
}

#[tokio::test(start_paused = true)]
async fn test_hung_notifier_times_out_into_celebration() {
    let notifier = RecordingNotifier::new(MockBehavior::Hang);
    let mut notices: Vec<Notice> = Vec::new();
    let mut wizard = WizardController::default();

    complete_card(&mut wizard);
    let outcome = wizard
        .submit(&notifier, Duration::from_secs(10), &mut notices)
        .await
        .expect("submit should start");

    assert!(matches!(outcome, DeliveryOutcome::Failed(_)));
    assert_eq!(wizard.stage(), Stage::Celebration);
    assert!(!wizard.is_sending());
    assert_eq!(notices.last().map(|n| n.level), Some(NoticeLevel::Error));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_incomplete_form_stays_put() {
    let notifier = RecordingNotifier::new(MockBehavior::Succeed);
    let mut notices: Vec<Notice> = Vec::new();
    let mut wizard = WizardController::default();

    assert!(wizard.accept());
    assert!(wizard.choose_game(Game::Genshin));
    assert!(wizard.choose_watch(Watch::Series));
    wizard.set_name("Ada");
    wizard.set_email("ada@example.com");

    let result = wizard
        .submit(&notifier, Duration::from_secs(10), &mut notices)
        .await;
    assert!(result.is_err());
    assert_eq!(wizard.stage(), Stage::ContactForm);
    assert!(notifier.sent().is_empty());
    assert_eq!(notices[0].title, "Please fill in everything! 🥺");
}

#[test]
fn test_decline_never_advances_and_saturates() {
    let mut rng = StdRng::seed_from_u64(14);
    let mut wizard = WizardController::default();

    for _ in 0..12 {
        wizard.evade(&mut rng);
    }

    assert_eq!(wizard.stage(), Stage::Proposal);
    assert_eq!(wizard.hover().hover_count, 12);
    assert_eq!(wizard.decline_label(), "PLEASE! 😭");
    assert!(wizard.hover().offset_x.abs() <= 150.0);
    assert!(wizard.hover().offset_y.abs() <= 150.0);
}
