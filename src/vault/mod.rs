//! Vault module — the encrypted record store.
//!
//! This module provides:
//! - The `Record` type (`record`)
//! - Id allocation with recycling (`ids`)
//! - SQLite CRUD over the record table (`store`)
//! - `VaultEngine`, the only surface callers should use (`engine`)

pub mod engine;
pub mod ids;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use engine::VaultEngine;
pub use ids::IdAllocator;
pub use record::Record;
pub use store::RecordStore;
