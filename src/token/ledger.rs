//! ERC-20 style token ledger
//!
//! An account-balance and allowance registry with the standard fungible
//! token interface: minting, transfers, approvals, and delegated transfers.

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Decimal places for every ledger. Fixed at construction, never changes.
pub const DECIMALS: u8 = 18;

/// Emitted event records retained per ledger, newest last.
const EVENT_HISTORY_LIMIT: usize = 100;

/// Ledger-related errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid recipient: the zero address cannot receive tokens")]
    InvalidRecipient,
    #[error("Invalid spender: the zero address cannot be approved")]
    InvalidSpender,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: U256, need: U256 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: U256, need: U256 },
    #[error("Decreased allowance below zero: have {have}, need {need}")]
    AllowanceUnderflow { have: U256, need: U256 },
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Ledger not found: {0}")]
    LedgerNotFound(Address),
    #[error("Ledger already exists: {0}")]
    LedgerAlreadyExists(Address),
    #[error("Invalid name: must be 1-64 characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-12 characters")]
    InvalidSymbol,
}

/// Transfer event (emitted when tokens are minted or moved)
///
/// A mint is recorded as a transfer from the zero address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub timestamp: DateTime<Utc>,
}

/// Approval event (emitted when an allowance is set or adjusted)
///
/// `amount` is always the resulting allowance, not the delta.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
    pub timestamp: DateTime<Utc>,
}

/// A record in the ledger's event history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Event {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
}

/// An ERC-20 style fungible token ledger
///
/// Balances and allowances are mutated only through the operations below.
/// Every operation validates all of its preconditions before touching any
/// state, so a failed call leaves the ledger exactly as it was.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Token name (e.g., "My Token")
    name: String,
    /// Token symbol (e.g., "MTK")
    symbol: String,
    /// Maintained sum of all balances
    total_supply: U256,
    /// Balances: account -> amount
    balances: HashMap<Address, U256>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<Address, HashMap<Address, U256>>,
    /// Emitted events, newest last (bounded)
    events: Vec<Event>,
}

impl TokenLedger {
    /// Create an empty ledger with the given name and symbol
    pub fn new(name: String, symbol: String) -> Self {
        Self {
            name,
            symbol,
            total_supply: U256::ZERO,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            events: Vec::new(),
        }
    }

    // =========================================================================
    // View Functions
    // =========================================================================

    /// Get the token name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the token symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the decimal places (always 18)
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Get the balance of an account (zero for unseen accounts)
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or(U256::ZERO)
    }

    /// Get the amount `spender` may move out of `owner`'s balance
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&owner)
            .and_then(|spenders| spenders.get(&spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Get the emitted event records, newest last
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get all accounts with a non-zero balance
    pub fn holders(&self) -> Vec<(Address, U256)> {
        self.balances
            .iter()
            .filter(|(_, &balance)| balance > U256::ZERO)
            .map(|(&account, &balance)| (account, balance))
            .collect()
    }

    /// Get the number of accounts with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances
            .values()
            .filter(|&&balance| balance > U256::ZERO)
            .count()
    }

    // =========================================================================
    // Mutating Functions
    // =========================================================================

    /// Mint new tokens to a recipient
    ///
    /// Increases the recipient's balance and the total supply. There is no
    /// supply cap and no caller restriction. The emitted transfer records
    /// the zero address as its source.
    pub fn mint(
        &mut self,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferEvent, LedgerError> {
        if recipient == Address::ZERO {
            return Err(LedgerError::InvalidRecipient);
        }

        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.total_supply = total_supply;
        // Cannot overflow: any single balance is bounded by the total supply
        *self.balances.entry(recipient).or_insert(U256::ZERO) += amount;

        let event = TransferEvent {
            from: Address::ZERO,
            to: recipient,
            amount,
            timestamp: Utc::now(),
        };
        self.record(Event::Transfer(event.clone()));

        Ok(event)
    }

    /// Transfer tokens from the caller to a recipient
    ///
    /// # Arguments
    /// * `caller` - Account the transfer is attributed to
    /// * `recipient` - Receiving account
    /// * `amount` - Amount to transfer
    pub fn transfer(
        &mut self,
        caller: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferEvent, LedgerError> {
        if recipient == Address::ZERO {
            return Err(LedgerError::InvalidRecipient);
        }

        let have = self.balance_of(caller);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }

        self.move_balance(caller, recipient, amount);

        let event = TransferEvent {
            from: caller,
            to: recipient,
            amount,
            timestamp: Utc::now(),
        };
        self.record(Event::Transfer(event.clone()));

        Ok(event)
    }

    /// Set a spender's allowance to exactly `amount` (overwrite, not additive)
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        if spender == Address::ZERO {
            return Err(LedgerError::InvalidSpender);
        }

        self.allowances
            .entry(caller)
            .or_default()
            .insert(spender, amount);

        let event = ApprovalEvent {
            owner: caller,
            spender,
            amount,
            timestamp: Utc::now(),
        };
        self.record(Event::Approval(event.clone()));

        Ok(event)
    }

    /// Raise a spender's allowance by `delta`
    ///
    /// The emitted approval carries the new total.
    pub fn increase_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        delta: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        if spender == Address::ZERO {
            return Err(LedgerError::InvalidSpender);
        }

        let updated = self
            .allowance(caller, spender)
            .checked_add(delta)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.allowances
            .entry(caller)
            .or_default()
            .insert(spender, updated);

        let event = ApprovalEvent {
            owner: caller,
            spender,
            amount: updated,
            timestamp: Utc::now(),
        };
        self.record(Event::Approval(event.clone()));

        Ok(event)
    }

    /// Lower a spender's allowance by `delta`
    ///
    /// The emitted approval carries the new total.
    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        delta: U256,
    ) -> Result<ApprovalEvent, LedgerError> {
        let have = self.allowance(caller, spender);
        if have < delta {
            return Err(LedgerError::AllowanceUnderflow { have, need: delta });
        }

        // An unset allowance only gets here with delta zero; leave it unset
        if let Some(entry) = self
            .allowances
            .get_mut(&caller)
            .and_then(|spenders| spenders.get_mut(&spender))
        {
            *entry = have - delta;
        }

        let event = ApprovalEvent {
            owner: caller,
            spender,
            amount: have - delta,
            timestamp: Utc::now(),
        };
        self.record(Event::Approval(event.clone()));

        Ok(event)
    }

    /// Transfer tokens out of an owner's balance on their behalf
    ///
    /// Requires a prior approval covering `amount`. On success the caller's
    /// allowance is reduced by `amount` and both a transfer and an approval
    /// (with the remaining allowance) are emitted.
    ///
    /// # Arguments
    /// * `caller` - Spender performing the transfer
    /// * `owner` - Account the tokens move out of
    /// * `recipient` - Receiving account
    /// * `amount` - Amount to transfer
    pub fn transfer_from(
        &mut self,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(TransferEvent, ApprovalEvent), LedgerError> {
        let allowed = self.allowance(owner, caller);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        let have = self.balance_of(owner);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }

        if recipient == Address::ZERO {
            return Err(LedgerError::InvalidRecipient);
        }

        let remaining = allowed - amount;
        self.allowances
            .entry(owner)
            .or_default()
            .insert(caller, remaining);

        self.move_balance(owner, recipient, amount);

        let transfer = TransferEvent {
            from: owner,
            to: recipient,
            amount,
            timestamp: Utc::now(),
        };
        let approval = ApprovalEvent {
            owner,
            spender: caller,
            amount: remaining,
            timestamp: Utc::now(),
        };
        self.record(Event::Transfer(transfer.clone()));
        self.record(Event::Approval(approval.clone()));

        Ok((transfer, approval))
    }

    /// Move an already-validated amount between accounts
    ///
    /// Debits before crediting so a self-transfer nets out to no change.
    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        *self.balances.entry(from).or_insert(U256::ZERO) -= amount;
        *self.balances.entry(to).or_insert(U256::ZERO) += amount;
    }

    /// Append to the event history, dropping the oldest past the limit
    fn record(&mut self, event: Event) {
        self.events.push(event);
        if self.events.len() > EVENT_HISTORY_LIMIT {
            self.events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn new_ledger() -> TokenLedger {
        TokenLedger::new("MyToken".to_string(), "My".to_string())
    }

    #[test]
    fn test_new_ledger_metadata() {
        let ledger = new_ledger();

        assert_eq!(ledger.name(), "MyToken");
        assert_eq!(ledger.symbol(), "My");
        assert_eq!(ledger.decimals(), 18);
        assert_eq!(ledger.total_supply(), U256::ZERO);
        assert_eq!(ledger.holder_count(), 0);
    }

    #[test]
    fn test_mint_updates_supply_and_balance() {
        let mut ledger = new_ledger();

        ledger.mint(addr(1), U256::from(50)).unwrap();

        assert_eq!(ledger.total_supply(), U256::from(50));
        assert_eq!(ledger.balance_of(addr(1)), U256::from(50));
        assert_eq!(ledger.holder_count(), 1);

        // Minting again accumulates
        ledger.mint(addr(1), U256::from(25)).unwrap();
        assert_eq!(ledger.total_supply(), U256::from(75));
        assert_eq!(ledger.balance_of(addr(1)), U256::from(75));
    }

    #[test]
    fn test_mint_to_zero_address_fails() {
        let mut ledger = new_ledger();

        let result = ledger.mint(Address::ZERO, U256::from(50));
        assert!(matches!(result, Err(LedgerError::InvalidRecipient)));
        assert_eq!(ledger.total_supply(), U256::ZERO);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_mint_event_comes_from_zero_address() {
        let mut ledger = new_ledger();

        let event = ledger.mint(addr(1), U256::from(50)).unwrap();

        assert_eq!(event.from, Address::ZERO);
        assert_eq!(event.to, addr(1));
        assert_eq!(event.amount, U256::from(50));
    }

    #[test]
    fn test_mint_amounts_beyond_64_bits() {
        let mut ledger = new_ledger();

        // 1 million tokens scaled by 10^18
        let amount = U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18));
        ledger.mint(addr(1), amount).unwrap();

        assert!(amount > U256::from(u64::MAX));
        assert_eq!(ledger.balance_of(addr(1)), amount);
        assert_eq!(ledger.total_supply(), amount);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();

        let event = ledger.transfer(addr(1), addr(2), U256::from(20)).unwrap();

        assert_eq!(event.from, addr(1));
        assert_eq!(event.to, addr(2));
        assert_eq!(event.amount, U256::from(20));
        assert_eq!(ledger.balance_of(addr(1)), U256::from(30));
        assert_eq!(ledger.balance_of(addr(2)), U256::from(20));
    }

    #[test]
    fn test_transfer_preserves_total_supply() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();

        ledger.transfer(addr(1), addr(2), U256::from(20)).unwrap();
        ledger.transfer(addr(2), addr(3), U256::from(5)).unwrap();

        assert_eq!(ledger.total_supply(), U256::from(50));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = new_ledger();

        let result = ledger.transfer(addr(1), addr(2), U256::from(50));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.balance_of(addr(2)), U256::ZERO);
    }

    #[test]
    fn test_transfer_to_zero_address_fails() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();

        let result = ledger.transfer(addr(1), Address::ZERO, U256::from(50));
        assert!(matches!(result, Err(LedgerError::InvalidRecipient)));
        assert_eq!(ledger.balance_of(addr(1)), U256::from(50));
    }

    #[test]
    fn test_self_transfer_keeps_balance() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();

        ledger.transfer(addr(1), addr(1), U256::from(20)).unwrap();

        assert_eq!(ledger.balance_of(addr(1)), U256::from(50));
        assert_eq!(ledger.total_supply(), U256::from(50));
    }

    #[test]
    fn test_zero_amount_transfer() {
        let mut ledger = new_ledger();

        // Legal even with no balance
        ledger.transfer(addr(1), addr(2), U256::ZERO).unwrap();
        assert_eq!(ledger.balance_of(addr(2)), U256::ZERO);
    }

    #[test]
    fn test_approve_overwrites() {
        let mut ledger = new_ledger();

        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::ZERO);

        ledger.approve(addr(1), addr(2), U256::from(5000)).unwrap();
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::from(5000));

        ledger.approve(addr(1), addr(2), U256::from(3000)).unwrap();
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::from(3000));

        // Revoke (set to 0)
        ledger.approve(addr(1), addr(2), U256::ZERO).unwrap();
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::ZERO);
    }

    #[test]
    fn test_approve_zero_spender_fails() {
        let mut ledger = new_ledger();

        let result = ledger.approve(addr(1), Address::ZERO, U256::from(30));
        assert!(matches!(result, Err(LedgerError::InvalidSpender)));
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_increase_then_decrease_allowance() {
        let mut ledger = new_ledger();

        let event = ledger
            .increase_allowance(addr(2), addr(1), U256::from(50))
            .unwrap();
        assert_eq!(event.amount, U256::from(50));
        assert_eq!(ledger.allowance(addr(2), addr(1)), U256::from(50));

        let event = ledger
            .decrease_allowance(addr(2), addr(1), U256::from(20))
            .unwrap();
        assert_eq!(event.amount, U256::from(30));
        assert_eq!(ledger.allowance(addr(2), addr(1)), U256::from(30));
    }

    #[test]
    fn test_increase_allowance_zero_spender_fails() {
        let mut ledger = new_ledger();

        let result = ledger.increase_allowance(addr(1), Address::ZERO, U256::from(50));
        assert!(matches!(result, Err(LedgerError::InvalidSpender)));
    }

    #[test]
    fn test_increase_allowance_overflow() {
        let mut ledger = new_ledger();
        ledger.approve(addr(1), addr(2), U256::MAX).unwrap();

        let result = ledger.increase_allowance(addr(1), addr(2), U256::from(1));
        assert!(matches!(result, Err(LedgerError::ArithmeticOverflow)));
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::MAX);
    }

    #[test]
    fn test_decrease_allowance_underflow() {
        let mut ledger = new_ledger();

        let result = ledger.decrease_allowance(addr(1), addr(2), U256::from(50));
        assert!(matches!(
            result,
            Err(LedgerError::AllowanceUnderflow { .. })
        ));
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::ZERO);
    }

    #[test]
    fn test_transfer_from() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();
        ledger
            .increase_allowance(addr(1), addr(2), U256::from(50))
            .unwrap();

        let (transfer, approval) = ledger
            .transfer_from(addr(2), addr(1), addr(3), U256::from(30))
            .unwrap();

        assert_eq!(transfer.from, addr(1));
        assert_eq!(transfer.to, addr(3));
        assert_eq!(transfer.amount, U256::from(30));
        assert_eq!(approval.owner, addr(1));
        assert_eq!(approval.spender, addr(2));
        assert_eq!(approval.amount, U256::from(20));

        assert_eq!(ledger.balance_of(addr(1)), U256::from(20));
        assert_eq!(ledger.balance_of(addr(3)), U256::from(30));
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::from(20));
        assert_eq!(ledger.total_supply(), U256::from(50));
    }

    #[test]
    fn test_transfer_from_insufficient_allowance() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();

        let result = ledger.transfer_from(addr(2), addr(1), addr(3), U256::from(30));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientAllowance { .. })
        ));

        // Nothing moved
        assert_eq!(ledger.balance_of(addr(1)), U256::from(50));
        assert_eq!(ledger.balance_of(addr(3)), U256::ZERO);
    }

    #[test]
    fn test_transfer_from_insufficient_balance() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(10)).unwrap();
        ledger.approve(addr(1), addr(2), U256::from(100)).unwrap();

        let result = ledger.transfer_from(addr(2), addr(1), addr(3), U256::from(30));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::from(100));
    }

    #[test]
    fn test_transfer_from_to_zero_address_fails() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();
        ledger.approve(addr(1), addr(2), U256::from(50)).unwrap();

        let result = ledger.transfer_from(addr(2), addr(1), Address::ZERO, U256::from(30));
        assert!(matches!(result, Err(LedgerError::InvalidRecipient)));
        assert_eq!(ledger.balance_of(addr(1)), U256::from(50));
        assert_eq!(ledger.allowance(addr(1), addr(2)), U256::from(50));
    }

    #[test]
    fn test_owner_spending_own_allowance() {
        // The original contract allows an owner to approve themselves and
        // call transferFrom as their own spender
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();
        ledger
            .increase_allowance(addr(1), addr(1), U256::from(50))
            .unwrap();

        let (_, approval) = ledger
            .transfer_from(addr(1), addr(1), addr(2), U256::from(30))
            .unwrap();

        assert_eq!(approval.amount, U256::from(20));
        assert_eq!(ledger.balance_of(addr(2)), U256::from(30));
    }

    #[test]
    fn test_event_history_is_bounded() {
        let mut ledger = new_ledger();

        for _ in 0..(EVENT_HISTORY_LIMIT + 5) {
            ledger.mint(addr(1), U256::from(1)).unwrap();
        }

        assert_eq!(ledger.events().len(), EVENT_HISTORY_LIMIT);
    }

    #[test]
    fn test_holders() {
        let mut ledger = new_ledger();
        ledger.mint(addr(1), U256::from(50)).unwrap();
        ledger.transfer(addr(1), addr(2), U256::from(50)).unwrap();

        // addr(1) zeroed out, only addr(2) holds
        let holders = ledger.holders();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0], (addr(2), U256::from(50)));
    }
}
