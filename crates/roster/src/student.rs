//! Student records and field validation.
//!
//! A [`Student`] is the only entity roster knows about. Field input typed at a
//! prompt is checked by the `parse_*` helpers here, each of which returns a
//! [`ValidationError`] instead of failing the session.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One student's data, as stored in the backing file.
///
/// Field constraints (non-empty strings, positive age) are enforced when a
/// record is typed in, not when it is loaded; a hand-edited file is accepted
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Identifier, unique within the roster. Never changes after creation.
    pub id: String,
    /// First name.
    pub first: String,
    /// Last name.
    pub last: String,
    /// Age in years.
    pub age: Age,
}

/// A stored age.
///
/// Typed-in ages are always [`Age::Years`]. A hand-edited file may hold any
/// other JSON value (`"41"`, `28.5`); it is kept and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    /// A whole number of years.
    Years(i64),
    /// Anything else found in the file.
    Raw(serde_json::Value),
}

impl From<i64> for Age {
    fn from(years: i64) -> Self {
        Self::Years(years)
    }
}

impl PartialEq<i64> for Age {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Years(years) if years == other)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(years) => fmt::Display::fmt(years, f),
            Self::Raw(serde_json::Value::String(text)) => f.pad(text),
            Self::Raw(other) => f.pad(&other.to_string()),
        }
    }
}

impl Student {
    /// Create a student record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        first: impl Into<String>,
        last: impl Into<String>,
        age: i64,
    ) -> Self {
        Self {
            id: id.into(),
            first: first.into(),
            last: last.into(),
            age: Age::Years(age),
        }
    }

    /// Apply an update, leaving the id untouched.
    pub fn apply(&mut self, update: StudentUpdate) {
        if let Some(first) = update.first {
            self.first = first;
        }
        if let Some(last) = update.last {
            self.last = last;
        }
        if let Some(age) = update.age {
            self.age = Age::Years(age);
        }
    }

    /// Pretty JSON rendering used by Find.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Changes collected by Update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    /// New first name.
    pub first: Option<String>,
    /// New last name.
    pub last: Option<String>,
    /// New age.
    pub age: Option<i64>,
}

/// Why a line of input was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace was entered.
    #[error("value cannot be empty")]
    Empty,
    /// The age did not parse as an integer.
    #[error("value is not a valid integer")]
    NotAnInteger,
    /// The age parsed but was zero or negative.
    #[error("value must be positive")]
    NotPositive,
    /// The age is a whole number too large to store.
    #[error("value is too large")]
    TooLarge,
}

/// Accept any line with non-whitespace content, trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input.
pub fn parse_nonempty(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse an age: a strictly positive integer.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input,
/// [`ValidationError::NotAnInteger`] if it doesn't parse, and
/// [`ValidationError::NotPositive`] for zero or negative values.
/// Whole numbers beyond `i64` give [`ValidationError::TooLarge`], or
/// [`ValidationError::NotPositive`] when negative.
pub fn parse_age(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let age: i64 = trimmed.parse().map_err(|err: ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow => ValidationError::TooLarge,
        IntErrorKind::NegOverflow => ValidationError::NotPositive,
        _ => ValidationError::NotAnInteger,
    })?;
    if age <= 0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(age)
}
