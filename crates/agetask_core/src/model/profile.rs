//! User profile consumed by the age feature.
//!
//! # Responsibility
//! - Hold the email and birth date captured at registration.
//! - Validate registration input shape.
//!
//! # Invariants
//! - Credentials never live here; authentication is external.
//! - `birth_date` is not after the registration date.

use crate::model::task::UserId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    NilId,
    InvalidEmail,
    BirthDateInFuture { birth_date: NaiveDate, today: NaiveDate },
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "profile id must not be nil"),
            Self::InvalidEmail => write!(f, "email address is malformed"),
            Self::BirthDateInFuture { birth_date, today } => write!(
                f,
                "birth_date ({birth_date}) must not be after today ({today})"
            ),
        }
    }
}

impl Error for ProfileValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl UserProfile {
    pub fn new(id: UserId, email: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            id,
            email: email.into(),
            birth_date,
        }
    }

    /// Validates shape against the registration date `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ProfileValidationError> {
        if self.id.is_nil() {
            return Err(ProfileValidationError::NilId);
        }
        if !is_valid_email(self.email.as_str()) {
            return Err(ProfileValidationError::InvalidEmail);
        }
        if self.birth_date > today {
            return Err(ProfileValidationError::BirthDateInFuture {
                birth_date: self.birth_date,
                today,
            });
        }
        Ok(())
    }
}

/// Normalizes an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
