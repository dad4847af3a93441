/// Application-level events delivered to the main loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The outbound notification finished (or gave up)
    NotificationSettled { result: Result<(), String> },

    /// Request to quit the application
    Quit,
}
