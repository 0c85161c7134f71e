//! Age derivation and child/adult classification.
//!
//! # Responsibility
//! - Parse `MM/dd/yyyy` birthdates strictly.
//! - Compute whole elapsed years, counting a year only on/after the
//!   birthday anniversary. A birthdate after the reference date yields a
//!   non-positive age rather than an error.
//! - Classify an optional age as child and/or adult.
//!
//! # Invariants
//! - A malformed birthdate is an error, never an unknown age.
//! - `is_child` and `is_adult` are independent: age 18 satisfies both and an
//!   unknown age is adult only.

use crate::model::person::Person;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed snapshot birthdate format.
pub const BIRTHDATE_FORMAT: &str = "%m/%d/%Y";

/// Age at which both the child and adult predicates hold.
pub const MAJORITY_AGE: i32 = 18;

pub type AgeResult<T> = Result<T, AgeError>;

/// Birthdate defects surfaced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    /// Text does not match `MM/dd/yyyy` or is not a calendar date.
    InvalidFormat(String),
}

impl Display for AgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(text) => {
                write!(f, "invalid birthdate `{text}`; expected MM/dd/yyyy")
            }
        }
    }
}

impl Error for AgeError {}

/// Parses a birthdate in the fixed two-digit-month/day, four-digit-year form.
pub fn parse_birthdate(text: &str) -> AgeResult<NaiveDate> {
    if !has_fixed_shape(text) {
        return Err(AgeError::InvalidFormat(text.to_string()));
    }
    NaiveDate::parse_from_str(text, BIRTHDATE_FORMAT)
        .map_err(|_| AgeError::InvalidFormat(text.to_string()))
}

/// Whole years between `birthdate` and `today`.
///
/// Negative when the birthdate is a year or more after `today`; zero when it
/// is less than a year after.
pub fn age_on(birthdate: &str, today: NaiveDate) -> AgeResult<i32> {
    let born = parse_birthdate(birthdate)?;
    let years = match today.years_since(born) {
        Some(elapsed) => to_signed(elapsed),
        None => born.years_since(today).map_or(0, |ahead| -to_signed(ahead)),
    };
    Ok(years)
}

/// Whole years between `birthdate` and the local current date.
pub fn age_of(birthdate: &str) -> AgeResult<i32> {
    age_on(birthdate, Local::now().date_naive())
}

/// Child predicate: known age at or below the majority threshold.
pub fn is_child(age: Option<i32>) -> bool {
    matches!(age, Some(years) if years <= MAJORITY_AGE)
}

/// Adult predicate: unknown age, or age at or above the majority threshold.
pub fn is_adult(age: Option<i32>) -> bool {
    match age {
        None => true,
        Some(years) => years >= MAJORITY_AGE,
    }
}

/// A resident paired with the age derived from their medical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonWithAge {
    pub person: Person,
    /// `None` when the person has no medical record.
    pub age: Option<i32>,
}

impl PersonWithAge {
    pub fn new(person: Person, age: Option<i32>) -> Self {
        Self { person, age }
    }

    pub fn is_child(&self) -> bool {
        is_child(self.age)
    }

    pub fn is_adult(&self) -> bool {
        is_adult(self.age)
    }
}

// chrono dates span far less than i32::MAX years.
fn to_signed(years: u32) -> i32 {
    i32::try_from(years).unwrap_or(i32::MAX)
}

fn has_fixed_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            2 | 5 => *byte == b'/',
            _ => byte.is_ascii_digit(),
        })
}
