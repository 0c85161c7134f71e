//! Medical record attached to a person by name.

use super::eq_ignore_case;
use serde::{Deserialize, Serialize};

/// Medical data for one person, matched by case-insensitive name.
///
/// `birthdate` keeps the raw `MM/dd/yyyy` text; parsing happens in
/// [`crate::age`] so a malformed value surfaces at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl MedicalRecord {
    /// Creates a record without medications or allergies.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate: birthdate.into(),
            medications: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Returns whether this record belongs to the given name, ignoring case.
    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        eq_ignore_case(&self.first_name, first_name) && eq_ignore_case(&self.last_name, last_name)
    }
}
