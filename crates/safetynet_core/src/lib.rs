//! Core query and mutation engine for SafetyNet alerts.
//! This crate owns the dataset, the age classification rules and every
//! alert/person use-case built on them.

pub mod age;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod snapshot;

pub use age::{age_of, age_on, is_adult, is_child, AgeError, PersonWithAge};
pub use logging::{
    default_log_level, init_logging, logging_status, LogConfig, LoggingError, LoggingStatus,
};
pub use model::fire_station::FireStationMapping;
pub use model::medical_record::MedicalRecord;
pub use model::person::{
    Person, PersonCreateRequest, PersonResponse, PersonUpdateRequest, PersonValidationError,
};
pub use repo::dataset_repo::{DatasetCounts, DatasetRepository, DatasetStore};
pub use service::alert_service::{
    AlertService, AlertServiceError, ChildEntry, HouseholdMember, HouseholdView, StationResident,
    StationRoster,
};
pub use service::person_service::{
    PersonService, PersonServiceError, UpdateOutcome, UpdateStatus,
};
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot, SnapshotError, SnapshotResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
