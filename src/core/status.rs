use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Display times in milliseconds.
pub const DEFAULT_DISPLAY_MS: i64 = 3000;
pub const RESTORE_WARNING_DISPLAY_MS: i64 = 5000;
pub const SHARE_DISPLAY_MS: i64 = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Banner-style message shown to the user until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub expires_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>, display_ms: i64) -> Self {
        Self::at(text, Severity::Info, Utc::now(), display_ms)
    }

    pub fn error(text: impl Into<String>, display_ms: i64) -> Self {
        Self::at(text, Severity::Error, Utc::now(), display_ms)
    }

    pub fn at(
        text: impl Into<String>,
        severity: Severity,
        shown_at: DateTime<Utc>,
        display_ms: i64,
    ) -> Self {
        Self {
            text: text.into(),
            severity,
            expires_at: shown_at + Duration::milliseconds(display_ms),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let shown = Utc::now();
        let msg = StatusMessage::at("Nothing to Share", Severity::Error, shown, DEFAULT_DISPLAY_MS);

        assert!(msg.is_error());
        assert!(!msg.is_expired_at(shown + Duration::milliseconds(2999)));
        assert!(msg.is_expired_at(shown + Duration::milliseconds(3000)));
    }

    #[test]
    fn test_share_message_lasts_longer() {
        let msg = StatusMessage::info("link", SHARE_DISPLAY_MS);
        assert!(!msg.is_error());
        assert!(!msg.is_expired_at(Utc::now() + Duration::seconds(5)));
    }
}
