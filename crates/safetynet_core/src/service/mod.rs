//! Core use-case services.
//!
//! # Responsibility
//! - Compose dataset lookups into alert views.
//! - Funnel every person mutation through one service.
//!
//! # Invariants
//! - Services depend on `DatasetRepository`, never on a concrete store.

pub mod alert_service;
pub mod person_service;
