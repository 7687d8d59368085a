//! Contact form route handler.
//!
//! Submissions are validated and logged; nothing is forwarded anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use baobab_core::Email;
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;

/// Acknowledgement shown after a valid submission.
pub const MESSAGE_RECEIVED: &str = "Thank you for your message! We will get back to you soon.";

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact form display data: the form as last submitted plus its outcome.
#[derive(Clone, Default)]
pub struct ContactView {
    pub name: String,
    pub email: String,
    pub message: String,
    pub error: Option<String>,
    /// Set once a submission has been accepted.
    pub acknowledgement: Option<&'static str>,
}

impl ContactView {
    /// A blank form.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    fn rejected(form: ContactForm, error: &str) -> Self {
        Self {
            name: form.name,
            email: form.email,
            message: form.message,
            error: Some(error.to_string()),
            acknowledgement: None,
        }
    }

    fn sent() -> Self {
        Self {
            acknowledgement: Some(MESSAGE_RECEIVED),
            ..Self::default()
        }
    }
}

/// Contact form fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact.html")]
pub struct ContactTemplate {
    pub contact: ContactView,
}

/// A submission that passed validation.
#[derive(Debug)]
struct ContactMessage {
    name: String,
    email: Email,
    message: String,
}

fn validate(form: &ContactForm) -> Result<ContactMessage, &'static str> {
    let name = form.name.trim();
    let message = form.message.trim();

    if name.is_empty() || message.is_empty() || form.email.trim().is_empty() {
        return Err("Name, email and message are required.");
    }

    let email =
        Email::parse_normalized(&form.email).map_err(|_| "Please enter a valid email address.")?;

    Ok(ContactMessage {
        name: name.to_string(),
        email,
        message: message.to_string(),
    })
}

/// Submit the contact form.
///
/// POST /contact
///
/// Invalid submissions re-render the form with an error and a 400 status.
/// HTMX is configured to swap 400 responses so the error is shown.
#[instrument(skip(form))]
pub async fn submit(Form(form): Form<ContactForm>) -> Response {
    match validate(&form) {
        Ok(contact) => {
            tracing::info!(
                name = %contact.name,
                email = %contact.email,
                message_len = contact.message.len(),
                "Contact message received"
            );
            add_breadcrumb("contact", "Message received", None);

            ContactTemplate {
                contact: ContactView::sent(),
            }
            .into_response()
        }
        Err(error) => {
            tracing::debug!(error, "Contact form rejected");
            (
                StatusCode::BAD_REQUEST,
                ContactTemplate {
                    contact: ContactView::rejected(form, error),
                },
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission_normalizes_email() {
        let contact = validate(&form(" Awa ", " Awa@Example.COM ", "Table for 4?")).unwrap();
        assert_eq!(contact.name, "Awa");
        assert_eq!(contact.email.as_str(), "awa@example.com");
        assert_eq!(contact.message, "Table for 4?");
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(validate(&form("", "awa@example.com", "hi")).is_err());
        assert!(validate(&form("Awa", "", "hi")).is_err());
        assert!(validate(&form("Awa", "awa@example.com", "   ")).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let err = validate(&form("Awa", "not-an-email", "hi")).unwrap_err();
        assert_eq!(err, "Please enter a valid email address.");
    }

    #[test]
    fn test_rejected_view_keeps_input() {
        let view = ContactView::rejected(form("Awa", "nope", "hi"), "bad");
        assert_eq!(view.name, "Awa");
        assert_eq!(view.email, "nope");
        assert_eq!(view.error.as_deref(), Some("bad"));
        assert!(view.acknowledgement.is_none());
    }

    #[test]
    fn test_sent_view_is_blank_with_acknowledgement() {
        let view = ContactView::sent();
        assert!(view.name.is_empty());
        assert_eq!(view.acknowledgement, Some(MESSAGE_RECEIVED));
    }
}
