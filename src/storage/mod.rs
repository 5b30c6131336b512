//! Persistence for the ledger registry
//!
//! JSON-backed storage with rotating backups and atomic saves.

pub mod persistence;

pub use persistence::{LedgerStore, StorageConfig, StorageError, StorageStats};
