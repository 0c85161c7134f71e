use safetynet_core::{
    load_snapshot, parse_snapshot, AlertService, DatasetRepository, SnapshotError,
};
use std::io::Write;

const SNAPSHOT: &str = r#"{
    "persons": [
        { "firstName": "John", "lastName": "Boyd", "address": "1509 Culver St", "city": "Culver",
          "zip": "97451", "phone": "841-874-6512", "email": "jaboyd@email.com", "nickname": "JB" },
        { "firstName": "Tenley", "lastName": "Boyd", "address": "1509 Culver St", "city": "Culver",
          "zip": "97451", "phone": "841-874-6512", "email": "tenz@email.com" },
        { "firstName": "Jonanathan", "lastName": "Marrack", "address": "29 15th St" }
    ],
    "firestations": [
        { "address": "1509 Culver St", "station": "3" },
        { "address": "29 15th St", "station": 2 }
    ],
    "medicalrecords": [
        { "firstName": "John", "lastName": "Boyd", "birthdate": "03/06/1984",
          "medications": ["aznol:350mg", "hydrapermazol:100mg"], "allergies": ["nillacilan"] },
        { "firstName": "Tenley", "lastName": "Boyd", "birthdate": "02/18/2012" }
    ],
    "schemaVersion": 1
}"#;

#[test]
fn parse_snapshot_loads_all_collections_and_ignores_unknown_fields() {
    let store = parse_snapshot(SNAPSHOT).unwrap();

    let counts = store.counts();
    assert_eq!(counts.persons, 3);
    assert_eq!(counts.firestations, 2);
    assert_eq!(counts.medicalrecords, 2);

    let john = store.medical_record_for("JOHN", "boyd").unwrap();
    assert_eq!(john.medications, vec!["aznol:350mg", "hydrapermazol:100mg"]);
    assert_eq!(john.allergies, vec!["nillacilan"]);
    let tenley = store.medical_record_for("Tenley", "Boyd").unwrap();
    assert!(tenley.medications.is_empty());

    let marrack = store.persons_at_address("29 15th st");
    assert_eq!(marrack.len(), 1);
    assert_eq!(marrack[0].phone, None);
}

#[test]
fn loaded_snapshot_answers_station_queries() {
    let store = parse_snapshot(SNAPSHOT).unwrap();
    let service = AlertService::new(&store);

    assert_eq!(service.phone_roster(3), vec!["841-874-6512".to_string()]);
    assert_eq!(store.persons_at_station(2).len(), 1);
}

#[test]
fn people_alias_is_accepted() {
    let store = parse_snapshot(
        r#"{ "people": [ { "firstName": "A", "lastName": "B" } ],
             "firestations": [], "medicalrecords": [] }"#,
    )
    .unwrap();
    assert_eq!(store.counts().persons, 1);
}

#[test]
fn missing_collection_is_fatal() {
    let err = parse_snapshot(r#"{ "persons": [], "firestations": [] }"#).unwrap_err();
    assert!(matches!(err, SnapshotError::Parse(_)));
}

#[test]
fn missing_required_person_field_is_fatal() {
    let err = parse_snapshot(
        r#"{ "persons": [ { "firstName": "OnlyFirst" } ],
             "firestations": [], "medicalrecords": [] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("lastName"));
}

#[test]
fn non_numeric_station_is_fatal() {
    let err = parse_snapshot(
        r#"{ "persons": [], "firestations": [ { "address": "x", "station": "three" } ],
             "medicalrecords": [] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SnapshotError::Parse(_)));
}

#[test]
fn load_snapshot_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();

    let store = load_snapshot(file.path()).unwrap();
    assert_eq!(store.counts().persons, 3);
}

#[test]
fn load_snapshot_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Io { path: ref failed, .. } if failed == &path));
}

#[test]
fn load_snapshot_invalid_json_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let err = load_snapshot(file.path()).unwrap_err();
    assert!(matches!(err, SnapshotError::Parse(_)));
}

#[test]
fn negative_station_number_loads() {
    let store = parse_snapshot(
        r#"{ "persons": [ { "firstName": "A", "lastName": "B", "address": "x" } ],
             "firestations": [ { "address": "x", "station": -1 }, { "address": "y", "station": "-2" } ],
             "medicalrecords": [] }"#,
    )
    .unwrap();
    assert_eq!(store.counts().firestations, 2);
    assert_eq!(store.persons_at_station(-1).len(), 1);
}
