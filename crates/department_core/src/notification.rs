use crate::Millis;

/// How long a notification stays visible unless dismissed.
pub const NOTIFICATION_DURATION_MS: Millis = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

/// Single-slot toast. A new notification replaces the visible one; nothing is queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    duration: Millis,
    active: Option<ActiveNotification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveNotification {
    notification: Notification,
    expires_at: Millis,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(NOTIFICATION_DURATION_MS)
    }
}

impl NotificationChannel {
    pub fn new(duration: Millis) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn show(&mut self, notification: Notification, now: Millis) {
        self.active = Some(ActiveNotification {
            notification,
            expires_at: now.saturating_add(self.duration),
        });
    }

    /// Hides the current notification. Returns whether one was visible.
    pub fn dismiss(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Hides the current notification if it has outlived its duration.
    pub fn expire(&mut self, now: Millis) -> bool {
        match &self.active {
            Some(active) if now >= active.expires_at => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.active.as_ref().map(|active| &active.notification)
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.active.as_ref().map(|active| active.expires_at)
    }
}
