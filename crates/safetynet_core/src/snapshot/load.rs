//! Snapshot loading entry points.
//!
//! # Invariants
//! - Returned stores hold exactly the snapshot content.
//! - Every load emits a `snapshot_load` start event and one ok/error event.

use super::{Snapshot, SnapshotError, SnapshotResult};
use crate::repo::dataset_repo::{DatasetRepository, DatasetStore};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Reads and parses a snapshot file into a new dataset store.
///
/// # Errors
/// - `SnapshotError::Io` when the file cannot be read.
/// - `SnapshotError::Parse` when the content is not a valid snapshot.
pub fn load_snapshot(path: impl AsRef<Path>) -> SnapshotResult<DatasetStore> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=snapshot_load module=snapshot status=start mode=file");

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            error!(
                "event=snapshot_load module=snapshot status=error mode=file duration_ms={} error_code=snapshot_read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    match build_store(&content) {
        Ok(store) => {
            let counts = store.counts();
            info!(
                "event=snapshot_load module=snapshot status=ok mode=file duration_ms={} persons={} firestations={} medicalrecords={}",
                started_at.elapsed().as_millis(),
                counts.persons,
                counts.firestations,
                counts.medicalrecords
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=snapshot_load module=snapshot status=error mode=file duration_ms={} error_code=snapshot_parse_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Parses snapshot JSON text into a new dataset store.
pub fn parse_snapshot(content: &str) -> SnapshotResult<DatasetStore> {
    let started_at = Instant::now();
    match build_store(content) {
        Ok(store) => {
            info!(
                "event=snapshot_load module=snapshot status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=snapshot_load module=snapshot status=error mode=memory duration_ms={} error_code=snapshot_parse_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn build_store(content: &str) -> SnapshotResult<DatasetStore> {
    let snapshot: Snapshot = serde_json::from_str(content)?;
    Ok(DatasetStore::new(
        snapshot.persons,
        snapshot.firestations,
        snapshot.medicalrecords,
    ))
}
