pub mod chroma;
pub mod config;
pub mod notify;
pub mod ui;
pub mod util;
pub mod wizard;

pub use config::Config;
pub use notify::{NotificationPayload, Notifier, NotifyError};
pub use ui::App;
pub use wizard::{Stage, WizardController};
