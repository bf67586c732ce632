//! Contact form messages.
//!
//! A [`ContactMessage`] can only be built with every field filled in, so a
//! message that reaches the API always carries a name, an email address and
//! a body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a contact message could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is not plausibly an address.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

/// A validated message for the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

impl ContactMessage {
    /// Build a message, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingField` for the first blank field and
    /// `ContactError::InvalidEmail` if the address has no `@` or no domain
    /// dot.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, ContactError> {
        let name = required("Name", name)?;
        let email = required("Email", email)?;
        let message = required("Message", message)?;

        // Basic email validation
        let plausible = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !plausible {
            return Err(ContactError::InvalidEmail(email));
        }

        Ok(Self {
            name,
            email,
            message,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// What the API answers once a message is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactReceipt {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub id: Option<String>,
    /// Set when the message was accepted without being stored.
    #[serde(default)]
    pub note: Option<String>,
}

impl ContactReceipt {
    /// Whether the server only queued the message instead of saving it.
    #[must_use]
    pub const fn is_queued(&self) -> bool {
        self.note.is_some()
    }
}
