//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract the store persists through.
//! - Isolate SQLite details from service orchestration.

pub mod kv_repo;
