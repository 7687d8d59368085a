//! Reply-to address for contact form messages.

use core::fmt;

/// Why a contact address was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email address is empty")]
    Empty,
    #[error("email address is longer than {max} characters")]
    TooLong { max: usize },
    #[error("email address contains whitespace")]
    Whitespace,
    #[error("email address needs exactly one @ with text on both sides")]
    BadSeparator,
    /// Domains like `localhost` or `example.` cannot receive our reply.
    #[error("email domain is not a dotted host name")]
    BadDomain,
}

/// A guest's email address, trimmed and lowercased.
///
/// ```
/// use baobab_core::Email;
///
/// let email = Email::parse_normalized(" Awa@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "awa@example.com");
/// assert!(Email::parse_normalized("awa@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Longest address a mail server must accept (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Normalize form input and check it looks deliverable.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] naming the first rule the input breaks.
    pub fn parse_normalized(input: &str) -> Result<Self, EmailError> {
        let address = input.trim().to_lowercase();

        if address.is_empty() {
            return Err(EmailError::Empty);
        }
        if address.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if address.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (mailbox, domain) = address.split_once('@').ok_or(EmailError::BadSeparator)?;
        if mailbox.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::BadSeparator);
        }
        if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
            return Err(EmailError::BadDomain);
        }

        Ok(Self(address))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
