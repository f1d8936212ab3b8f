use chrono::{DateTime, Duration, Utc};

/// A status line that disappears on its own once its deadline passes.
///
/// Expiry is checked when the message is read, so nothing keeps running after
/// the owning state is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashMessage {
    pub text: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl FlashMessage {
    pub fn sticky<T: Into<String>>(text: T) -> Self {
        FlashMessage { text: text.into(), expires_at: None }
    }

    pub fn expiring<T: Into<String>>(text: T, now: DateTime<Utc>, ttl: Duration) -> Self {
        FlashMessage { text: text.into(), expires_at: Some(now + ttl) }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// Text of the message if it is still showing at `now`.
pub fn visible(message: &Option<FlashMessage>, now: DateTime<Utc>) -> Option<&str> {
    message
        .as_ref()
        .filter(|m| m.is_active(now))
        .map(|m| m.text.as_str())
}
