//! Person domain model and mutation request shapes.
//!
//! # Responsibility
//! - Define the resident record owned by the dataset store.
//! - Define create/update request payloads and the person response view.
//! - Validate create requests before they reach the store.
//!
//! # Invariants
//! - `first_name`/`last_name` never change after creation.
//! - Contact fields are optional; a blank string is a value, not absence,
//!   everywhere except the update comparison in `PersonService`.

use super::eq_ignore_case;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_NAME_CHARS: usize = 50;
const MAX_EMAIL_CHARS: usize = 120;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Resident record as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Person {
    /// Creates a person with no contact data.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: None,
            city: None,
            zip: None,
            phone: None,
            email: None,
        }
    }

    /// Builder-style setter for the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Builder-style setter for the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Builder-style setter for the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Case-insensitive natural-key match.
    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        eq_ignore_case(&self.first_name, first_name) && eq_ignore_case(&self.last_name, last_name)
    }

    /// Case-sensitive natural-key match, used only by the creation conflict check.
    pub fn has_exact_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

/// Validation error for person create requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// Required field is empty or whitespace-only.
    BlankField(&'static str),
    /// Field exceeds its maximum length in characters.
    TooLong { field: &'static str, max_chars: usize },
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} is required"),
            Self::TooLong { field, max_chars } => {
                write!(f, "{field} must be at most {max_chars} chars")
            }
            Self::InvalidEmail(value) => write!(f, "email must be a valid email: `{value}`"),
        }
    }
}

impl Error for PersonValidationError {}

/// Create payload for a new person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl PersonCreateRequest {
    /// Checks required fields, length limits and email shape.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        validate_name("firstName", &self.first_name)?;
        validate_name("lastName", &self.last_name)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("zip", &self.zip)?;
        require("phone", &self.phone)?;
        require("email", &self.email)?;

        if self.email.chars().count() > MAX_EMAIL_CHARS {
            return Err(PersonValidationError::TooLong {
                field: "email",
                max_chars: MAX_EMAIL_CHARS,
            });
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(PersonValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }

    /// Converts the request into the stored record shape.
    pub fn into_person(self) -> Person {
        Person {
            first_name: self.first_name,
            last_name: self.last_name,
            address: Some(self.address),
            city: Some(self.city),
            zip: Some(self.zip),
            phone: Some(self.phone),
            email: Some(self.email),
        }
    }
}

/// Update payload for an existing person.
///
/// An absent field clears the stored value unless the stored value is
/// already blank or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonUpdateRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Person view returned by mutation use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// Never computed on mutation paths; kept for wire compatibility.
    pub age: Option<i32>,
}

impl From<&Person> for PersonResponse {
    fn from(person: &Person) -> Self {
        Self {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            email: person.email.clone(),
            age: None,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), PersonValidationError> {
    if value.trim().is_empty() {
        return Err(PersonValidationError::BlankField(field));
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), PersonValidationError> {
    require(field, value)?;
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(PersonValidationError::TooLong {
            field,
            max_chars: MAX_NAME_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PersonCreateRequest, PersonValidationError};

    fn request() -> PersonCreateRequest {
        PersonCreateRequest {
            first_name: "John".to_string(),
            last_name: "Boyd".to_string(),
            address: "1509 Culver St".to_string(),
            city: "Culver".to_string(),
            zip: "97451".to_string(),
            phone: "841-874-6512".to_string(),
            email: "jaboyd@email.com".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        request().validate().expect("request should be valid");
    }

    #[test]
    fn blank_fields_are_rejected_in_order() {
        let mut req = request();
        req.city = "   ".to_string();
        req.phone = String::new();
        assert_eq!(
            req.validate().unwrap_err(),
            PersonValidationError::BlankField("city")
        );
    }

    #[test]
    fn long_names_are_rejected() {
        let mut req = request();
        req.last_name = "x".repeat(51);
        assert!(matches!(
            req.validate().unwrap_err(),
            PersonValidationError::TooLong {
                field: "lastName",
                max_chars: 50
            }
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        assert!(matches!(
            req.validate().unwrap_err(),
            PersonValidationError::InvalidEmail(_)
        ));
    }
}
