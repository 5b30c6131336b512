//! Command-line interface for the token ledger

pub mod commands;

pub use commands::*;
