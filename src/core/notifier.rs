// src/core/notifier.rs
use crate::app_log;

/// Surfaces a blocking, user-facing message.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);

    /// Shows the loading indicator text while a request is in flight.
    fn progress(&self, _message: &str) {}
}

/// Prints alerts to stderr so they never mix with generated text on stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        app_log!(info, "Alert: {}", message);
        eprintln!("{}", message);
    }

    fn progress(&self, message: &str) {
        eprintln!("{}", message);
    }
}
