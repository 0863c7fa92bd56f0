//! User-facing notifications
//!
//! Stores report outcomes as notices on a broadcast channel; the UI layer
//! subscribes and renders them as toasts. A bounded ring of recent notices
//! is kept for consumers that attach late, and for assertions in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

const RECENT_CAPACITY: usize = 32;
const CHANNEL_CAPACITY: usize = 64;

/// Notice fan-out shared by every store
///
/// Cloning yields a handle onto the same channel and ring.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
    recent: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            recent: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Live stream of notices
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        let notice = Notice { level, message };
        tracing::debug!(level = ?notice.level, message = %notice.message, "Notice");
        {
            let mut recent = self.recent.lock().unwrap_or_else(|e| e.into_inner());
            if recent.len() == RECENT_CAPACITY {
                recent.pop_front();
            }
            recent.push_back(notice.clone());
        }
        // Nobody listening is fine.
        let _ = self.tx.send(notice);
    }

    /// Recent notices, oldest first
    pub fn recent(&self) -> Vec<Notice> {
        self.recent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Most recent notice
    pub fn last(&self) -> Option<Notice> {
        self.recent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .back()
            .cloned()
    }

    pub fn clear(&self) {
        self.recent.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
