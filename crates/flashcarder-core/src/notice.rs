//! User-visible notices.
//!
//! Some failures must not abort the operation that caused them, for
//! example a study session write that fails after the in-memory state
//! already moved on. Those are published here so the presentation layer
//! can tell the user without the core depending on it.
//!
//! # Example
//!
//! ```ignore
//! let notices = Notices::new();
//! let mut rx = notices.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(notice) = rx.recv().await {
//!         eprintln!("{}", notice.message);
//!     }
//! });
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default channel capacity.
const DEFAULT_CAPACITY: usize = 64;

/// What a notice is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoticeKind {
    /// Writing a storage key failed; memory and disk may differ until the
    /// next successful write.
    StorageWriteFailed { key: String },
    /// A stored session was dropped because its deck no longer exists.
    SessionDiscarded { deck_id: String },
}

/// A single notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn storage_write_failed(key: &str, error: impl std::fmt::Display) -> Self {
        Self::new(
            NoticeKind::StorageWriteFailed {
                key: key.to_string(),
            },
            format!("could not save {key}: {error}"),
        )
    }
}

/// Broadcast channel for notices.
#[derive(Debug, Clone)]
pub struct Notices {
    tx: broadcast::Sender<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { tx }
    }

    /// Publish a notice to all current subscribers.
    pub fn publish(&self, notice: Notice) {
        // No receivers is fine.
        let _ = self.tx.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_notices() {
        let notices = Notices::new();
        let mut rx = notices.subscribe();
        notices.publish(Notice::storage_write_failed("studySessions", "disk full"));

        let notice = rx.recv().await.unwrap();
        assert_eq!(
            notice.kind,
            NoticeKind::StorageWriteFailed {
                key: "studySessions".into()
            }
        );
        assert_eq!(notice.message, "could not save studySessions: disk full");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        Notices::new().publish(Notice::new(
            NoticeKind::SessionDiscarded {
                deck_id: "d1".into(),
            },
            "gone",
        ));
    }

    #[test]
    fn kind_is_tagged() {
        let value = serde_json::to_value(NoticeKind::SessionDiscarded {
            deck_id: "d1".into(),
        })
        .unwrap();
        assert_eq!(value["type"], "sessionDiscarded");
        assert_eq!(value["deck_id"], "d1");
    }
}
