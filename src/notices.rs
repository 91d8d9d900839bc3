//! Transient, one-line messages shown to the user.
//!
//! Calendar failures never propagate to the host; they end up here instead.

use std::sync::Mutex;
use tracing::info;

/// Receiver of user-facing notices
pub trait NoticeSink: Send + Sync {
    fn notice(&self, message: &str);
}

/// Prints notices on stderr so inserted text on stdout stays clean
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotices;

impl NoticeSink for TerminalNotices {
    fn notice(&self, message: &str) {
        info!(notice = message, "Showing notice");
        eprintln!("{}", message);
    }
}

/// Keeps notices in memory
#[derive(Debug, Default)]
pub struct MemoryNotices {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every notice received so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NoticeSink for MemoryNotices {
    fn notice(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
