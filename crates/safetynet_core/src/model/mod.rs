//! Domain model for the alert dataset.
//!
//! # Responsibility
//! - Define the records loaded from the dataset snapshot.
//! - Define request/response shapes used by the person mutation use-cases.
//!
//! # Invariants
//! - `(first_name, last_name)` is the natural key of a person.
//! - Fire-station mappings and medical records are read-only after load.

pub mod fire_station;
pub mod medical_record;
pub mod person;

/// Case-insensitive string equality used by every name/address lookup.
///
/// Compares per-character lowercase expansions so non-ASCII names match the
/// same way ASCII ones do.
pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
