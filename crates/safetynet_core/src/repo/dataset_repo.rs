//! Dataset repository contract and in-memory store.
//!
//! # Responsibility
//! - Hold the people, fire-station and medical-record collections.
//! - Answer address/station/name lookups used by the alert queries.
//! - Expose the single mutation entry point for the person collection.
//!
//! # Invariants
//! - Lookups never fail; absence is an empty `Vec` or `None`.
//! - Each collection has its own lock; person edits run under one write
//!   guard so readers never observe a partial mutation.
//! - Fire-station mappings and medical records are never written after load.

use crate::model::eq_ignore_case;
use crate::model::fire_station::FireStationMapping;
use crate::model::medical_record::MedicalRecord;
use crate::model::person::Person;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Collection sizes for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub persons: usize,
    pub firestations: usize,
    pub medicalrecords: usize,
}

/// Read/write contract the alert and person services are written against.
pub trait DatasetRepository {
    /// Residents whose address equals `address`, ignoring case.
    fn persons_at_address(&self, address: &str) -> Vec<Person>;
    /// Residents whose address is mapped to `station_number`, matched exactly.
    fn persons_at_station(&self, station_number: i32) -> Vec<Person>;
    /// First medical record for the name, ignoring case.
    fn medical_record_for(&self, first_name: &str, last_name: &str) -> Option<MedicalRecord>;
    /// Current collection sizes.
    fn counts(&self) -> DatasetCounts;
    /// Runs `edit` against the live person collection under the write lock.
    fn with_persons_mut<T>(&self, edit: impl FnOnce(&mut Vec<Person>) -> T) -> T;
}

/// In-memory dataset shared by all request handlers.
#[derive(Debug, Default)]
pub struct DatasetStore {
    persons: RwLock<Vec<Person>>,
    firestations: RwLock<Vec<FireStationMapping>>,
    medicalrecords: RwLock<Vec<MedicalRecord>>,
}

impl DatasetStore {
    pub fn new(
        persons: Vec<Person>,
        firestations: Vec<FireStationMapping>,
        medicalrecords: Vec<MedicalRecord>,
    ) -> Self {
        Self {
            persons: RwLock::new(persons),
            firestations: RwLock::new(firestations),
            medicalrecords: RwLock::new(medicalrecords),
        }
    }

    /// Snapshot copy of every person in insertion order.
    pub fn all_persons(&self) -> Vec<Person> {
        self.persons.read().clone()
    }

    /// Addresses mapped to `station_number`, as stored in the mappings.
    pub fn addresses_for_station(&self, station_number: i32) -> HashSet<String> {
        self.firestations
            .read()
            .iter()
            .filter(|mapping| mapping.station_number == station_number)
            .map(|mapping| mapping.address.clone())
            .collect()
    }
}

impl DatasetRepository for DatasetStore {
    fn persons_at_address(&self, address: &str) -> Vec<Person> {
        self.persons
            .read()
            .iter()
            .filter(|person| {
                person
                    .address
                    .as_deref()
                    .is_some_and(|stored| eq_ignore_case(stored, address))
            })
            .cloned()
            .collect()
    }

    fn persons_at_station(&self, station_number: i32) -> Vec<Person> {
        let addresses = self.addresses_for_station(station_number);
        if addresses.is_empty() {
            return Vec::new();
        }

        self.persons
            .read()
            .iter()
            .filter(|person| {
                person
                    .address
                    .as_ref()
                    .is_some_and(|address| addresses.contains(address))
            })
            .cloned()
            .collect()
    }

    fn medical_record_for(&self, first_name: &str, last_name: &str) -> Option<MedicalRecord> {
        self.medicalrecords
            .read()
            .iter()
            .find(|record| record.matches_name(first_name, last_name))
            .cloned()
    }

    fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            persons: self.persons.read().len(),
            firestations: self.firestations.read().len(),
            medicalrecords: self.medicalrecords.read().len(),
        }
    }

    fn with_persons_mut<T>(&self, edit: impl FnOnce(&mut Vec<Person>) -> T) -> T {
        let mut persons = self.persons.write();
        edit(&mut persons)
    }
}

impl<R: DatasetRepository> DatasetRepository for &R {
    fn persons_at_address(&self, address: &str) -> Vec<Person> {
        (**self).persons_at_address(address)
    }

    fn persons_at_station(&self, station_number: i32) -> Vec<Person> {
        (**self).persons_at_station(station_number)
    }

    fn medical_record_for(&self, first_name: &str, last_name: &str) -> Option<MedicalRecord> {
        (**self).medical_record_for(first_name, last_name)
    }

    fn counts(&self) -> DatasetCounts {
        (**self).counts()
    }

    fn with_persons_mut<T>(&self, edit: impl FnOnce(&mut Vec<Person>) -> T) -> T {
        (**self).with_persons_mut(edit)
    }
}

impl<R: DatasetRepository> DatasetRepository for Arc<R> {
    fn persons_at_address(&self, address: &str) -> Vec<Person> {
        (**self).persons_at_address(address)
    }

    fn persons_at_station(&self, station_number: i32) -> Vec<Person> {
        (**self).persons_at_station(station_number)
    }

    fn medical_record_for(&self, first_name: &str, last_name: &str) -> Option<MedicalRecord> {
        (**self).medical_record_for(first_name, last_name)
    }

    fn counts(&self) -> DatasetCounts {
        (**self).counts()
    }

    fn with_persons_mut<T>(&self, edit: impl FnOnce(&mut Vec<Person>) -> T) -> T {
        (**self).with_persons_mut(edit)
    }
}
