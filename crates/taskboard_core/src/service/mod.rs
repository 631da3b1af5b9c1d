//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and persistence into view-facing intents.
//! - Keep callers decoupled from storage details.

pub mod store;
