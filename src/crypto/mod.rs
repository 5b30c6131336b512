//! Hashing utilities for the ledger
//!
//! This module provides:
//! - SHA-256 hashing
//! - Ledger address derivation

pub mod hash;

pub use hash::{ledger_address, sha256};
