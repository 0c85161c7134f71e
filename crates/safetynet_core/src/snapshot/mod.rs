//! Dataset snapshot format and startup loading.
//!
//! # Responsibility
//! - Define the typed JSON snapshot shape.
//! - Load a snapshot once into a `DatasetStore`.
//!
//! # Invariants
//! - Unknown snapshot fields are ignored.
//! - A missing collection, missing required field or malformed value fails
//!   the whole load; no partial dataset is ever returned.

use crate::model::fire_station::FireStationMapping;
use crate::model::medical_record::MedicalRecord;
use crate::model::person::Person;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod load;

pub use load::{load_snapshot, parse_snapshot};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Root document of a dataset snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(alias = "people")]
    pub persons: Vec<Person>,
    pub firestations: Vec<FireStationMapping>,
    pub medicalrecords: Vec<MedicalRecord>,
}

/// Fatal startup errors.
#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot content is not a valid dataset document.
    Parse(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read snapshot `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid snapshot data: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
