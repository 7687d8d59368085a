//! Notification toast fragments.
//!
//! The page has a single `#toast` slot. A toast schedules its own dismissal
//! with an HTMX `load delay:` trigger; a newer toast replaces the element, and
//! with it the pending dismissal.

use askama::Template;
use askama_web::WebTemplate;
use baobab_core::notification::Notification;

/// A visible toast.
#[derive(Clone)]
pub struct ToastView {
    pub message: String,
    pub dismiss_ms: u64,
}

impl From<Notification> for ToastView {
    fn from(notification: Notification) -> Self {
        Self {
            message: notification.message,
            dismiss_ms: Notification::dismiss_after_ms(),
        }
    }
}

/// The toast slot, empty or holding one toast.
#[derive(Clone, Default)]
pub struct ToastSlotView {
    pub toast: Option<ToastView>,
    /// Render as an out-of-band swap (when bundled into another response).
    pub oob: bool,
}

impl ToastSlotView {
    /// An empty slot swapped in place.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot showing `notification`, swapped out of band.
    #[must_use]
    pub fn out_of_band(notification: Notification) -> Self {
        Self {
            toast: Some(notification.into()),
            oob: true,
        }
    }
}

/// Toast slot fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub toast_slot: ToastSlotView,
}

/// Clear the toast slot once the dismiss delay has elapsed.
#[allow(clippy::unused_async)]
pub async fn dismiss() -> ToastTemplate {
    ToastTemplate {
        toast_slot: ToastSlotView::empty(),
    }
}
