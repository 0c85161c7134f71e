//! Person mutation use-cases.
//!
//! # Responsibility
//! - Create, delete and update residents in the live dataset.
//! - Enforce the `(first_name, last_name)` uniqueness rule on creation.
//!
//! # Invariants
//! - Every check-then-write sequence runs under one write guard.
//! - The creation conflict check compares names case-sensitively, while
//!   delete/update locate people case-insensitively.
//! - Names are immutable after creation.
//! - Mutation responses never carry an age.

use crate::model::person::{
    Person, PersonCreateRequest, PersonResponse, PersonUpdateRequest, PersonValidationError,
};
use crate::repo::dataset_repo::DatasetRepository;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for person creation.
#[derive(Debug)]
pub enum PersonServiceError {
    /// Create request failed field validation.
    Validation(PersonValidationError),
    /// A person with the same names already exists.
    Conflict {
        first_name: String,
        last_name: String,
    },
}

impl Display for PersonServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict {
                first_name,
                last_name,
            } => write!(
                f,
                "person with same first and last name already exists: {first_name} {last_name}"
            ),
        }
    }
}

impl Error for PersonServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Conflict { .. } => None,
        }
    }
}

impl From<PersonValidationError> for PersonServiceError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result classification of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// No person matched the requested names.
    NotFound,
    /// Person matched but every field already held the requested value.
    NoChange,
    /// At least one field was overwritten.
    Updated,
}

/// Update result envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub status: UpdateStatus,
    /// Present only when `status == UpdateStatus::Updated`.
    pub person: Option<PersonResponse>,
}

impl UpdateOutcome {
    fn without_person(status: UpdateStatus) -> Self {
        Self {
            status,
            person: None,
        }
    }
}

/// Person mutation facade over a dataset repository.
pub struct PersonService<R: DatasetRepository> {
    repo: R,
}

impl<R: DatasetRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and appends a new person.
    ///
    /// # Errors
    /// - `Validation` when a required field is blank, too long or malformed.
    /// - `Conflict` when the exact same names already exist.
    pub fn create_person(
        &self,
        request: PersonCreateRequest,
    ) -> Result<PersonResponse, PersonServiceError> {
        request.validate()?;

        self.repo.with_persons_mut(|persons| {
            if persons
                .iter()
                .any(|person| person.has_exact_name(&request.first_name, &request.last_name))
            {
                warn!(
                    "event=person_create module=person status=conflict first_name={} last_name={}",
                    request.first_name, request.last_name
                );
                return Err(PersonServiceError::Conflict {
                    first_name: request.first_name,
                    last_name: request.last_name,
                });
            }

            let person = request.into_person();
            let response = PersonResponse::from(&person);
            info!(
                "event=person_create module=person status=ok first_name={} last_name={}",
                person.first_name, person.last_name
            );
            persons.push(person);
            Ok(response)
        })
    }

    /// Removes every person matching the names, ignoring case.
    ///
    /// Returns whether anything was removed.
    pub fn delete_person(&self, first_name: &str, last_name: &str) -> bool {
        let removed = self.repo.with_persons_mut(|persons| {
            let before = persons.len();
            persons.retain(|person| !person.matches_name(first_name, last_name));
            before - persons.len()
        });

        if removed > 0 {
            info!(
                "event=person_delete module=person status=ok first_name={} last_name={} removed={}",
                first_name, last_name, removed
            );
        } else {
            warn!(
                "event=person_delete module=person status=not_found first_name={} last_name={}",
                first_name, last_name
            );
        }
        removed > 0
    }

    /// Overwrites contact fields of the first person matching the names.
    ///
    /// Values are compared trimmed; blank and absent count as equal.
    pub fn update_person_fields(
        &self,
        first_name: &str,
        last_name: &str,
        update: &PersonUpdateRequest,
    ) -> UpdateOutcome {
        let outcome = self.repo.with_persons_mut(|persons| {
            let Some(person) = persons
                .iter_mut()
                .find(|person| person.matches_name(first_name, last_name))
            else {
                return UpdateOutcome::without_person(UpdateStatus::NotFound);
            };

            if !apply_update(person, update) {
                return UpdateOutcome::without_person(UpdateStatus::NoChange);
            }

            UpdateOutcome {
                status: UpdateStatus::Updated,
                person: Some(PersonResponse::from(&*person)),
            }
        });

        match outcome.status {
            UpdateStatus::NotFound => warn!(
                "event=person_update module=person status=not_found first_name={} last_name={}",
                first_name, last_name
            ),
            UpdateStatus::NoChange => info!(
                "event=person_update module=person status=no_change first_name={} last_name={}",
                first_name, last_name
            ),
            UpdateStatus::Updated => info!(
                "event=person_update module=person status=ok first_name={} last_name={}",
                first_name, last_name
            ),
        }
        outcome
    }
}

fn apply_update(person: &mut Person, update: &PersonUpdateRequest) -> bool {
    let mut changed = false;
    changed |= overwrite_if_different(&mut person.address, &update.address);
    changed |= overwrite_if_different(&mut person.city, &update.city);
    changed |= overwrite_if_different(&mut person.zip, &update.zip);
    changed |= overwrite_if_different(&mut person.phone, &update.phone);
    changed |= overwrite_if_different(&mut person.email, &update.email);
    changed
}

fn overwrite_if_different(stored: &mut Option<String>, requested: &Option<String>) -> bool {
    if !differs_trimmed(stored.as_deref(), requested.as_deref()) {
        return false;
    }
    *stored = requested.clone();
    true
}

fn differs_trimmed(stored: Option<&str>, requested: Option<&str>) -> bool {
    fn normalize(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|value| !value.is_empty())
    }
    normalize(stored) != normalize(requested)
}

#[cfg(test)]
mod tests {
    use super::differs_trimmed;

    #[test]
    fn blank_and_absent_are_not_different() {
        assert!(!differs_trimmed(None, None));
        assert!(!differs_trimmed(Some("  "), None));
        assert!(!differs_trimmed(None, Some("")));
    }

    #[test]
    fn values_are_compared_trimmed() {
        assert!(!differs_trimmed(Some(" Culver "), Some("Culver")));
        assert!(differs_trimmed(Some("Culver"), Some("culver")));
        assert!(differs_trimmed(Some("Culver"), None));
    }
}
