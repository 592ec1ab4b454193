use std::time::{Duration, Instant};

/// How long an error notification stays up unless dismissed.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
struct ToastMessage {
    text: String,
    level: ToastLevel,
    expires_at: Instant,
}

/// Single-slot, non-blocking notification channel.
///
/// Each message carries its own deadline, so dismissing or replacing a
/// message leaves no timer behind that could clear a later one early.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    current: Option<ToastMessage>,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises an error notice.
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.raise(text.into(), ToastLevel::Error, now);
    }

    /// Raises a non-error notice, such as a finished analysis.
    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.raise(text.into(), ToastLevel::Info, now);
    }

    fn raise(&mut self, text: String, level: ToastLevel, now: Instant) {
        self.current = Some(ToastMessage {
            text,
            level,
            expires_at: now + TOAST_DURATION,
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drops the message once its deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.current = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.text.as_str())
    }

    pub fn level(&self) -> Option<ToastLevel> {
        self.current.as_ref().map(|m| m.level)
    }

    /// Time left before the current message expires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current.as_ref().map(|m| m.expires_at.saturating_duration_since(now))
    }
}
