//! Alert query use-cases.
//!
//! # Responsibility
//! - Build the station roster, phone roster and household views.
//! - Derive ages through medical records and classify residents.
//!
//! # Invariants
//! - Queries never mutate the dataset.
//! - Only `household_view` treats an empty lookup as an error.
//! - Children and adult projections are computed independently, so the
//!   age-18 overlap is preserved.
//! - A malformed birthdate fails the query instead of yielding unknown age.

use crate::age::{age_of, age_on, AgeError, PersonWithAge};
use crate::model::person::Person;
use crate::repo::dataset_repo::{DatasetCounts, DatasetRepository};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for alert queries.
#[derive(Debug)]
pub enum AlertServiceError {
    /// No resident lives at the requested address.
    AddressNotFound(String),
    /// A matched medical record carries an unusable birthdate.
    InvalidBirthdate {
        first_name: String,
        last_name: String,
        source: AgeError,
    },
}

impl Display for AlertServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddressNotFound(address) => {
                write!(f, "address `{address}` is not found in dataset")
            }
            Self::InvalidBirthdate {
                first_name,
                last_name,
                source,
            } => write!(
                f,
                "medical record for {first_name} {last_name} is invalid: {source}"
            ),
        }
    }
}

impl Error for AlertServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AddressNotFound(_) => None,
            Self::InvalidBirthdate { source, .. } => Some(source),
        }
    }
}

/// One resident line of a station roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResident {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone: Option<String>,
}

/// Residents covered by one station with child/adult counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRoster {
    pub residents: Vec<StationResident>,
    pub children_count: usize,
    pub adults_count: usize,
}

/// Child entry of a household view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildEntry {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

/// Name-only entry of a household view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    pub first_name: String,
    pub last_name: String,
}

/// Residents at one address split for child alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdView {
    pub children: Vec<ChildEntry>,
    #[serde(rename = "familyMembers")]
    pub other_members: Vec<HouseholdMember>,
}

/// Read-only alert query facade over a dataset repository.
pub struct AlertService<R: DatasetRepository> {
    repo: R,
    reference_date: Option<NaiveDate>,
}

impl<R: DatasetRepository> AlertService<R> {
    /// Creates a service that evaluates ages against the local current date.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            reference_date: None,
        }
    }

    /// Creates a service that evaluates ages against a fixed date.
    pub fn with_reference_date(repo: R, reference_date: NaiveDate) -> Self {
        Self {
            repo,
            reference_date: Some(reference_date),
        }
    }

    /// Residents covered by `station_number` with child/adult counts.
    ///
    /// A resident aged exactly 18 is counted in both totals.
    pub fn station_roster(&self, station_number: i32) -> Result<StationRoster, AlertServiceError> {
        let residents = self.repo.persons_at_station(station_number);
        let classified = self.classify_all(residents)?;

        let children_count = classified.iter().filter(|entry| entry.is_child()).count();
        let adults_count = classified.iter().filter(|entry| entry.is_adult()).count();
        let residents = classified
            .into_iter()
            .map(|entry| StationResident {
                first_name: entry.person.first_name,
                last_name: entry.person.last_name,
                address: entry.person.address,
                phone: entry.person.phone,
            })
            .collect::<Vec<_>>();

        info!(
            "event=station_roster module=alert status=ok station={} residents={} children={} adults={}",
            station_number,
            residents.len(),
            children_count,
            adults_count
        );
        Ok(StationRoster {
            residents,
            children_count,
            adults_count,
        })
    }

    /// Distinct non-blank phones of residents covered by `station_number`,
    /// sorted ascending.
    pub fn phone_roster(&self, station_number: i32) -> Vec<String> {
        let phones = self
            .repo
            .persons_at_station(station_number)
            .into_iter()
            .filter_map(|person| person.phone)
            .filter(|phone| !phone.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        info!(
            "event=phone_roster module=alert status=ok station={} phones={}",
            station_number,
            phones.len()
        );
        phones
    }

    /// Children and other members living at `address`.
    ///
    /// # Errors
    /// - `AddressNotFound` when nobody lives at `address`.
    /// - `InvalidBirthdate` when a resident's medical record is malformed.
    pub fn household_view(&self, address: &str) -> Result<HouseholdView, AlertServiceError> {
        let household = self.repo.persons_at_address(address);
        if household.is_empty() {
            warn!(
                "event=household_view module=alert status=not_found address={}",
                address
            );
            return Err(AlertServiceError::AddressNotFound(address.to_string()));
        }

        let classified = self.classify_all(household)?;
        let children = classified
            .iter()
            .filter(|entry| entry.is_child())
            .filter_map(|entry| {
                entry.age.map(|age| ChildEntry {
                    first_name: entry.person.first_name.clone(),
                    last_name: entry.person.last_name.clone(),
                    age,
                })
            })
            .collect::<Vec<_>>();
        let other_members = classified
            .iter()
            .filter(|entry| entry.is_adult())
            .map(|entry| HouseholdMember {
                first_name: entry.person.first_name.clone(),
                last_name: entry.person.last_name.clone(),
            })
            .collect::<Vec<_>>();

        info!(
            "event=household_view module=alert status=ok address={} children={} members={}",
            address,
            children.len(),
            other_members.len()
        );
        Ok(HouseholdView {
            children,
            other_members,
        })
    }

    /// Collection sizes of the underlying dataset.
    pub fn dataset_counts(&self) -> DatasetCounts {
        self.repo.counts()
    }

    fn classify_all(&self, persons: Vec<Person>) -> Result<Vec<PersonWithAge>, AlertServiceError> {
        persons
            .into_iter()
            .map(|person| self.classify(person))
            .collect()
    }

    fn classify(&self, person: Person) -> Result<PersonWithAge, AlertServiceError> {
        let Some(record) = self
            .repo
            .medical_record_for(&person.first_name, &person.last_name)
        else {
            debug!(
                "event=classify module=alert status=no_record first_name={} last_name={}",
                person.first_name, person.last_name
            );
            return Ok(PersonWithAge::new(person, None));
        };

        let computed = match self.reference_date {
            Some(today) => age_on(&record.birthdate, today),
            None => age_of(&record.birthdate),
        };
        match computed {
            Ok(age) => Ok(PersonWithAge::new(person, Some(age))),
            Err(source) => {
                error!(
                    "event=classify module=alert status=error error_code=invalid_birthdate first_name={} last_name={} error={}",
                    person.first_name, person.last_name, source
                );
                Err(AlertServiceError::InvalidBirthdate {
                    first_name: person.first_name,
                    last_name: person.last_name,
                    source,
                })
            }
        }
    }
}
