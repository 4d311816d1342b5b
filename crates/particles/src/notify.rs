//! Transient user notifications.
//!
//! The directory reports successful actions as notifications. They are purely
//! client-side: nothing is delivered anywhere, and each one expires after its
//! display duration.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::config::NotificationConfig;

/// Severity of a notification. The directory only reports successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// The action completed.
    Success,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
        }
    }
}

/// Display settings applied to every notification a view emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    /// How long the notification stays visible.
    pub duration: Duration,
    /// Whether it can be dismissed early.
    pub closable: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self::from(&NotificationConfig::default())
    }
}

impl From<&NotificationConfig> for NotificationSettings {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.duration_ms),
            closable: config.closable,
        }
    }
}

/// A single transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// One-sentence body.
    pub description: String,
    /// Severity.
    pub status: NotificationStatus,
    /// Display duration in milliseconds.
    pub duration_ms: u64,
    /// Whether it can be dismissed early.
    pub closable: bool,
    /// When it was raised.
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification issued now.
    #[must_use]
    pub fn new(
        status: NotificationStatus,
        title: impl Into<String>,
        description: impl Into<String>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
            duration_ms: u64::try_from(settings.duration.as_millis()).unwrap_or(u64::MAX),
            closable: settings.closable,
            issued_at: Utc::now(),
        }
    }

    /// Create a success notification issued now.
    #[must_use]
    pub fn success(
        title: impl Into<String>,
        description: impl Into<String>,
        settings: NotificationSettings,
    ) -> Self {
        Self::new(NotificationStatus::Success, title, description, settings)
    }

    /// The display duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Whether the notification is no longer visible at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        TimeDelta::from_std(self.duration())
            .ok()
            .and_then(|delta| self.issued_at.checked_add_signed(delta))
            .is_some_and(|expires_at| now >= expires_at)
    }
}

/// Receives notifications raised by the directory view.
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Present a notification.
    fn notify(&self, notification: Notification);
}

/// Collects notifications in memory until they are drained.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all pending notifications, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }

    /// Remove every pending notification and return those still visible at
    /// `now`, oldest first. Expired ones are discarded.
    #[must_use]
    pub fn drain_active(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut active = self.drain();
        active.retain(|n| !n.is_expired(now));
        active
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().map_or(0, |pending| pending.len())
    }

    /// Whether no notifications are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        tracing::debug!(title = %notification.title, status = %notification.status, "Notification raised");
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(ms: u64) -> NotificationSettings {
        NotificationSettings {
            duration: Duration::from_millis(ms),
            closable: true,
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = NotificationSettings::default();
        assert_eq!(settings.duration, Duration::from_millis(5000));
        assert!(settings.closable);
    }

    #[test]
    fn test_success_notification() {
        let n = Notification::success("Developer added", "Ada has been added.", settings(5000));
        assert_eq!(n.status, NotificationStatus::Success);
        assert_eq!(n.duration(), Duration::from_millis(5000));
        assert!(n.closable);
    }

    #[test]
    fn test_is_expired() {
        let n = Notification::success("t", "d", settings(1000));
        assert!(!n.is_expired(n.issued_at));
        assert!(!n.is_expired(n.issued_at + TimeDelta::milliseconds(999)));
        assert!(n.is_expired(n.issued_at + TimeDelta::milliseconds(1000)));
    }

    #[test]
    fn test_huge_duration_never_expires() {
        let mut n = Notification::success("t", "d", settings(1000));
        n.duration_ms = u64::MAX;
        assert!(!n.is_expired(n.issued_at + TimeDelta::days(365)));
    }

    #[test]
    fn test_queue_collects_and_drains() {
        let queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.notify(Notification::success("one", "", settings(10)));
        queue.notify(Notification::success("two", "", settings(10)));
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained[0].title, "one");
        assert_eq!(drained[1].title, "two");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_drain_active_discards_expired() {
        let queue = NotificationQueue::new();
        let short = Notification::success("short", "", settings(10));
        let long = Notification::success("long", "", settings(60_000));
        let now = short.issued_at + TimeDelta::seconds(1);
        queue.notify(short);
        queue.notify(long);

        let active = queue.drain_active(now);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "long");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(NotificationStatus::Success.to_string(), "success");
    }
}
