//! Token Ledger: an ERC20-style fungible token ledger in Rust
//!
//! This crate provides a complete token ledger implementation featuring:
//! - Account balances and spender allowances (the standard ERC-20 surface)
//! - Minting with zero-address protection and a maintained total supply
//! - Direct and delegated transfers with atomic validate-then-mutate semantics
//! - Structured Transfer/Approval event records returned per mutation
//! - A registry deploying many ledgers under derived addresses
//! - JSON persistence with rotating backups
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::{Address, U256};
//! use token_ledger::token::TokenLedger;
//!
//! let mut ledger = TokenLedger::new("MyToken".to_string(), "My".to_string());
//! let alice = Address::repeat_byte(0x11);
//! let bob = Address::repeat_byte(0x22);
//!
//! // Mint, then transfer
//! ledger.mint(alice, U256::from(50)).unwrap();
//! ledger.transfer(alice, bob, U256::from(20)).unwrap();
//!
//! assert_eq!(ledger.balance_of(alice), U256::from(30));
//! assert_eq!(ledger.balance_of(bob), U256::from(20));
//! assert_eq!(ledger.total_supply(), U256::from(50));
//! ```

pub mod cli;
pub mod crypto;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use storage::{LedgerStore, StorageConfig, StorageError};
pub use token::{
    ApprovalEvent, Event, LedgerError, LedgerRegistry, TokenLedger, TransferEvent,
};
