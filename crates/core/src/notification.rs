//! Transient toast messages.

use std::time::Duration;

/// How long a toast stays visible.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// A single toast. Showing a new one replaces whatever is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// "`name` added to cart!"
    #[must_use]
    pub fn item_added(name: &str) -> Self {
        Self::new(format!("{name} added to cart!"))
    }

    /// Dismiss delay in whole milliseconds.
    #[must_use]
    pub fn dismiss_after_ms() -> u64 {
        u64::try_from(DISMISS_AFTER.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_added_message() {
        assert_eq!(
            Notification::item_added("Yassa Poulet").message,
            "Yassa Poulet added to cart!"
        );
    }

    #[test]
    fn test_dismiss_delay() {
        assert_eq!(Notification::dismiss_after_ms(), 3000);
    }
}
