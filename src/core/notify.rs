//! Notification contract for transient user-facing notices.
//!
//! The soft-delete machine surfaces its undo affordance and failure messages
//! through this trait rather than through ambient global state. One provider
//! is constructed at application startup and injected into everything that
//! needs to notify.

use serde::Serialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient notice shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    /// Stable key for the notice, used by `dismiss`. The soft-delete machine
    /// uses the entity id so the undo notice can be withdrawn exactly when
    /// the pending-delete state is exited.
    pub key: String,
    pub level: NoticeLevel,
    pub message: String,
    /// Whether the notice carries an actionable undo affordance.
    pub undoable: bool,
}

impl Notice {
    pub fn undo_offer(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            level: NoticeLevel::Info,
            message: message.into(),
            undoable: true,
        }
    }

    pub fn warning(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            level: NoticeLevel::Warning,
            message: message.into(),
            undoable: false,
        }
    }

    pub fn error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            level: NoticeLevel::Error,
            message: message.into(),
            undoable: false,
        }
    }
}

/// Sink for transient notices.
pub trait Notifier: Send + Sync {
    fn show(&self, notice: Notice);

    /// Withdraws the notice with the given key. Dismissing an unknown or
    /// already-dismissed key is a no-op.
    fn dismiss(&self, key: &str);
}

/// Default notifier: emits notices to the tracing log. A real frontend
/// replaces this with a channel into its toast component.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => {
                tracing::warn!(key = %notice.key, message = %notice.message, "notice")
            }
            _ => tracing::info!(
                key = %notice.key,
                message = %notice.message,
                undoable = notice.undoable,
                "notice"
            ),
        }
    }

    fn dismiss(&self, key: &str) {
        tracing::debug!(key = %key, "notice dismissed");
    }
}
