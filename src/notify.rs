//! User-visible notifications

use std::sync::Mutex;

/// Message shown when an enhancement request fails
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred. Please try again.";

/// Blocking notification channel shown to the user
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Records alerts instead of showing them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
