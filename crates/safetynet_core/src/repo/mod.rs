//! Dataset access layer.
//!
//! # Responsibility
//! - Define the lookup/mutation contract used by the services.
//! - Keep locking details inside the store.
//!
//! # Invariants
//! - Read lookups represent absence as empty results, never as errors.
//! - The person collection is the only collection with a write path.

pub mod dataset_repo;
