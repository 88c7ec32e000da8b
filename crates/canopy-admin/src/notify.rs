use std::sync::Mutex;

/// Blocking user prompts the admin page raises.
///
/// In the browser these are `alert()` and `confirm()`; the CLI prints to the
/// terminal and reads stdin.
pub trait Notifier {
    /// Shows a message the user must acknowledge.
    fn alert(&self, message: &str);

    /// Asks a yes/no question; `true` means proceed.
    fn confirm(&self, message: &str) -> bool;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Notifier that records every prompt and answers confirmations with a
/// fixed reply. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    approve: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// A notifier that answers every confirmation with `approve`.
    #[must_use]
    pub fn new(approve: bool) -> Self {
        Self {
            approve,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn confirms(&self) -> Vec<String> {
        self.confirms
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut confirms) = self.confirms.lock() {
            confirms.push(message.to_string());
        }
        self.approve
    }
}
