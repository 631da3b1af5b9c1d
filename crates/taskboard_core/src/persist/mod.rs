//! Persisted project snapshots and their reconciliation into the model.
//!
//! # Responsibility
//! - Define the JSON shape stored under the `projects` key.
//! - Rebuild validated entities from that shape, migrating legacy dates.
//!
//! # Invariants
//! - Writers always emit the `{"projects": [...]}` envelope.
//! - Readers never fail the caller on corrupt input; they fall back to empty.

pub mod reconcile;
pub mod snapshot;
