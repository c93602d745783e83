//! Transient notifications shown below the form.

use std::collections::VecDeque;
use std::time::Duration;
use std::time::Instant;

use registration_lib::submit::Notification;
use registration_lib::submit::NotificationLevel;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// Error toasts stay up a little longer.
pub const ERROR_TOAST_DURATION: Duration = Duration::from_secs(6);

/// Toasts visible at once; older ones are dropped first.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub duration: Duration,
}

impl Toast {
    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Info, DEFAULT_TOAST_DURATION)
    }

    /// Create a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Success, DEFAULT_TOAST_DURATION)
    }

    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Error, ERROR_TOAST_DURATION)
    }

    fn with_level(message: impl Into<String>, level: ToastLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            duration,
        }
    }
}

impl From<Notification> for Toast {
    fn from(notification: Notification) -> Self {
        match notification.level {
            NotificationLevel::Success => Toast::success(notification.message),
            NotificationLevel::Error => Toast::error(notification.message),
        }
    }
}

/// Active toasts, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    active: VecDeque<(Toast, Instant)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `toast` starting at `now`.
    pub fn push(&mut self, toast: Toast, now: Instant) {
        let expires_at = now + toast.duration;
        self.active.push_back((toast, expires_at));
        while self.active.len() > MAX_TOASTS {
            self.active.pop_front();
        }
    }

    /// Drops expired toasts. Returns `true` if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.active.len();
        self.active.retain(|(_, expires_at)| *expires_at > now);
        self.active.len() != before
    }

    /// When the next toast expires.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().map(|(_, expires_at)| *expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|(toast, _)| toast)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let start = Instant::now();
        let mut toasts = Toasts::new();
        toasts.push(Toast::success("Registered"), start);
        toasts.push(Toast::error("Error : no message provided"), start);

        assert_eq!(toasts.next_deadline(), Some(start + DEFAULT_TOAST_DURATION));
        assert!(!toasts.prune(start + Duration::from_secs(1)));

        assert!(toasts.prune(start + DEFAULT_TOAST_DURATION));
        let left: Vec<_> = toasts.iter().map(|t| t.level).collect();
        assert_eq!(left, vec![ToastLevel::Error]);

        toasts.prune(start + ERROR_TOAST_DURATION);
        assert!(toasts.is_empty());
        assert_eq!(toasts.next_deadline(), None);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let now = Instant::now();
        let mut toasts = Toasts::new();
        for i in 0..5 {
            toasts.push(Toast::info(format!("toast {}", i)), now);
        }
        let messages: Vec<_> = toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn test_from_notification() {
        let toast = Toast::from(Notification::error("Error : Email already exists"));
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.duration, ERROR_TOAST_DURATION);
    }
}
