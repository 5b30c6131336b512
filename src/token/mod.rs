//! ERC-20 style fungible token ledger
//!
//! Provides the standard fungible token interface with:
//! - Balances per account and a maintained total supply
//! - Allowances for delegated transfers
//! - Mint, transfer, approve, and allowance-adjustment operations
//! - Structured Transfer/Approval event records per mutation
//!
//! # Example
//!
//! ```ignore
//! use alloy_primitives::{Address, U256};
//! use token_ledger::token::LedgerRegistry;
//!
//! let mut registry = LedgerRegistry::new();
//! let deployer = Address::repeat_byte(0xAA);
//!
//! // Deploy a new ledger
//! let address = registry
//!     .deploy("My Token".to_string(), "MTK".to_string(), deployer)
//!     .unwrap();
//!
//! // Mint and transfer tokens
//! let alice = Address::repeat_byte(0x11);
//! let bob = Address::repeat_byte(0x22);
//! registry.mint(&address, alice, U256::from(1000)).unwrap();
//! registry.transfer(&address, alice, bob, U256::from(400)).unwrap();
//!
//! // Check balance
//! let balance = registry.balance_of(&address, bob).unwrap();
//! ```

pub mod ledger;
pub mod registry;

pub use ledger::{ApprovalEvent, Event, LedgerError, TokenLedger, TransferEvent, DECIMALS};
pub use registry::LedgerRegistry;
