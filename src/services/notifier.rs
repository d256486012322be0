//! Transient user notices.
//!
//! The host decides how a notice is shown; the sync engine and settings surface
//! only ever hand over a short message.

use std::sync::Mutex;

use serde_json::json;

/// Displays a short-lived message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notices to stderr, for the interactive CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("[notice] {}", message);
    }
}

/// Emits notices as `{"event":"notice"}` lines on stdout, next to RPC responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpcNotifier;

impl RpcNotifier {
    pub fn event_line(message: &str) -> String {
        json!({"event": "notice", "message": message}).to_string()
    }
}

impl Notifier for RpcNotifier {
    fn notify(&self, message: &str) {
        println!("{}", Self::event_line(message));
    }
}

/// Keeps every notice in memory, for hosts that poll and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns and clears the recorded notices.
    pub fn drain(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_string());
        }
    }
}
