//! Ledger registry for deploying and invoking token ledgers
//!
//! Models the deployment harness: constructs ledgers with `(name, symbol)`
//! arguments, hands out derived addresses, and attributes each operation
//! to a caller identity.

use crate::crypto::ledger_address;
use crate::token::ledger::{
    ApprovalEvent, Event, LedgerError, TokenLedger, TransferEvent,
};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Manages all deployed ledgers
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerRegistry {
    /// All ledgers by derived address
    ledgers: HashMap<Address, TokenLedger>,
    /// Deployment counter for address derivation
    nonce: u64,
}

impl LedgerRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self {
            ledgers: HashMap::new(),
            nonce: 0,
        }
    }

    /// Deploy a new ledger and return its address
    ///
    /// The ledger starts empty: zero supply, no balances, no allowances.
    pub fn deploy(
        &mut self,
        name: String,
        symbol: String,
        deployer: Address,
    ) -> Result<Address, LedgerError> {
        if name.is_empty() || name.len() > 64 {
            return Err(LedgerError::InvalidName);
        }
        if symbol.is_empty() || symbol.len() > 12 {
            return Err(LedgerError::InvalidSymbol);
        }

        let address = ledger_address(&deployer, &symbol, self.nonce);
        self.nonce += 1;

        if self.ledgers.contains_key(&address) {
            return Err(LedgerError::LedgerAlreadyExists(address));
        }

        let ledger = TokenLedger::new(name, symbol);
        log::info!(
            "Ledger deployed: {} ({}) at {}",
            ledger.name(),
            ledger.symbol(),
            address
        );
        self.ledgers.insert(address, ledger);

        Ok(address)
    }

    /// Get a ledger by address
    pub fn get(&self, address: &Address) -> Option<&TokenLedger> {
        self.ledgers.get(address)
    }

    /// Get a mutable reference to a ledger
    pub fn get_mut(&mut self, address: &Address) -> Option<&mut TokenLedger> {
        self.ledgers.get_mut(address)
    }

    /// List all deployed ledgers
    pub fn list(&self) -> Vec<(Address, &TokenLedger)> {
        self.ledgers
            .iter()
            .map(|(&address, ledger)| (address, ledger))
            .collect()
    }

    /// Get the number of deployed ledgers
    pub fn count(&self) -> usize {
        self.ledgers.len()
    }

    /// Check if a ledger exists
    pub fn exists(&self, address: &Address) -> bool {
        self.ledgers.contains_key(address)
    }

    /// Mint tokens on a ledger
    pub fn mint(
        &mut self,
        ledger: &Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferEvent, LedgerError> {
        self.resolve_mut(ledger)?.mint(recipient, amount)
    }

    /// Transfer tokens on a ledger
    pub fn transfer(
        &mut self,
        ledger: &Address,
        caller: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferEvent, LedgerError> {
        self.resolve_mut(ledger)?.transfer(caller, recipient, amount)
    }

    /// Set a spender's allowance on a ledger
    pub fn approve(
        &mut self,
        ledger: &Address,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        self.resolve_mut(ledger)?.approve(caller, spender, amount)
    }

    /// Raise a spender's allowance on a ledger
    pub fn increase_allowance(
        &mut self,
        ledger: &Address,
        caller: Address,
        spender: Address,
        delta: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        self.resolve_mut(ledger)?
            .increase_allowance(caller, spender, delta)
    }

    /// Lower a spender's allowance on a ledger
    pub fn decrease_allowance(
        &mut self,
        ledger: &Address,
        caller: Address,
        spender: Address,
        delta: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        self.resolve_mut(ledger)?
            .decrease_allowance(caller, spender, delta)
    }

    /// Delegated transfer on a ledger
    pub fn transfer_from(
        &mut self,
        ledger: &Address,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(TransferEvent, ApprovalEvent), LedgerError> {
        self.resolve_mut(ledger)?
            .transfer_from(caller, owner, recipient, amount)
    }

    /// Get an account balance on a ledger
    pub fn balance_of(&self, ledger: &Address, account: Address) -> Result<U256, LedgerError> {
        Ok(self.resolve(ledger)?.balance_of(account))
    }

    /// Get an allowance on a ledger
    pub fn allowance(
        &self,
        ledger: &Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, LedgerError> {
        Ok(self.resolve(ledger)?.allowance(owner, spender))
    }

    /// Get the total supply of a ledger
    pub fn total_supply(&self, ledger: &Address) -> Result<U256, LedgerError> {
        Ok(self.resolve(ledger)?.total_supply())
    }

    /// Get the event history of a ledger, newest last
    pub fn events(&self, ledger: &Address) -> Result<&[Event], LedgerError> {
        Ok(self.resolve(ledger)?.events())
    }

    /// Get all ledgers where an account holds a non-zero balance
    pub fn ledgers_for_holder(&self, account: Address) -> Vec<(Address, U256)> {
        self.ledgers
            .iter()
            .filter_map(|(&address, ledger)| {
                let balance = ledger.balance_of(account);
                if balance > U256::ZERO {
                    Some((address, balance))
                } else {
                    None
                }
            })
            .collect()
    }

    fn resolve(&self, address: &Address) -> Result<&TokenLedger, LedgerError> {
        self.ledgers
            .get(address)
            .ok_or(LedgerError::LedgerNotFound(*address))
    }

    fn resolve_mut(&mut self, address: &Address) -> Result<&mut TokenLedger, LedgerError> {
        self.ledgers
            .get_mut(address)
            .ok_or(LedgerError::LedgerNotFound(*address))
    }
}
