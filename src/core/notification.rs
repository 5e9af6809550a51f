//! # Notifications
//!
//! Transient, user-facing messages. The core queues them; adapters decide how
//! to show them (a banner in the TUI, a line on stdout/stderr headless).

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
    pub displayed_at: Option<Instant>,
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Duration::from_secs(4),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Expiry counts from first display, not creation.
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}

// Timestamps are bookkeeping; two notifications are equal by level and text.
impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.message == other.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let n = Notification::error("boom");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "boom");
        assert_eq!(n.duration, Duration::from_secs(4));
        assert!(n.displayed_at.is_none());
    }

    #[test]
    fn test_not_expired_until_displayed() {
        let n = Notification::info("hi").with_duration(Duration::ZERO);
        assert!(!n.is_expired());
    }

    #[test]
    fn test_expiry_after_display() {
        let mut n = Notification::info("hi").with_duration(Duration::from_nanos(1));
        n.mark_displayed();
        std::thread::sleep(Duration::from_millis(1));
        assert!(n.is_expired());
    }
}
