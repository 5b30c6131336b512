//! CLI commands for the token ledger
//!
//! Implements all command handlers for the CLI interface.

use crate::storage::{LedgerStore, StorageConfig};
use crate::token::{Event, LedgerRegistry};
use alloy_primitives::{Address, U256};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub registry: LedgerRegistry,
    pub store: LedgerStore,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize application state
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let store = LedgerStore::new(config)?;

        // Load or create the registry
        let registry = if store.exists() {
            println!("📂 Loading existing registry...");
            store.load()?
        } else {
            println!("🆕 Creating new registry...");
            let registry = LedgerRegistry::new();
            store.save(&registry)?;
            registry
        };

        Ok(Self {
            registry,
            store,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.store.save(&self.registry)?;
        Ok(())
    }
}

fn parse_address(input: &str) -> CliResult<Address> {
    input
        .parse()
        .map_err(|e| format!("Invalid address '{}': {}", input, e).into())
}

fn parse_amount(input: &str) -> CliResult<U256> {
    input
        .parse()
        .map_err(|e| format!("Invalid amount '{}': {}", input, e).into())
}

/// Initialize an empty registry
pub fn cmd_init(data_dir: &PathBuf) -> CliResult<()> {
    let config = StorageConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    };
    let store = LedgerStore::new(config)?;

    if store.exists() {
        println!("⚠️  Registry already exists at {:?}", data_dir);
        return Ok(());
    }

    store.save(&LedgerRegistry::new())?;

    println!("✅ Registry initialized!");
    println!("   📁 Data directory: {:?}", data_dir);

    Ok(())
}

/// Deploy a new ledger
pub fn cmd_deploy(state: &mut AppState, name: &str, symbol: &str, deployer: &str) -> CliResult<()> {
    let deployer = parse_address(deployer)?;

    let address = state
        .registry
        .deploy(name.to_string(), symbol.to_string(), deployer)?;
    state.save()?;

    println!("🪙 Ledger deployed!");
    println!("   📍 Address: {}", address);
    println!("   🏷️  Name: {} ({})", name, symbol);
    println!("   🔢 Decimals: 18");

    Ok(())
}

/// Mint tokens to an account
pub fn cmd_mint(state: &mut AppState, ledger: &str, to: &str, amount: &str) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let to = parse_address(to)?;
    let amount = parse_amount(amount)?;

    let event = state.registry.mint(&ledger, to, amount)?;
    state.save()?;

    println!("✅ Minted {} tokens to {}", event.amount, event.to);
    println!(
        "   💰 New total supply: {}",
        state.registry.total_supply(&ledger)?
    );

    Ok(())
}

/// Transfer tokens between accounts
pub fn cmd_transfer(
    state: &mut AppState,
    ledger: &str,
    from: &str,
    to: &str,
    amount: &str,
) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let from = parse_address(from)?;
    let to = parse_address(to)?;
    let amount = parse_amount(amount)?;

    let event = state.registry.transfer(&ledger, from, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} tokens", event.amount);
    println!("   {} -> {}", event.from, event.to);

    Ok(())
}

/// Set a spender's allowance
pub fn cmd_approve(
    state: &mut AppState,
    ledger: &str,
    owner: &str,
    spender: &str,
    amount: &str,
) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let owner = parse_address(owner)?;
    let spender = parse_address(spender)?;
    let amount = parse_amount(amount)?;

    let event = state.registry.approve(&ledger, owner, spender, amount)?;
    state.save()?;

    println!("✅ Approval set");
    println!("   Owner: {}", event.owner);
    println!("   Spender: {}", event.spender);
    println!("   Allowance: {}", event.amount);

    Ok(())
}

/// Raise a spender's allowance
pub fn cmd_increase_allowance(
    state: &mut AppState,
    ledger: &str,
    owner: &str,
    spender: &str,
    delta: &str,
) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let owner = parse_address(owner)?;
    let spender = parse_address(spender)?;
    let delta = parse_amount(delta)?;

    let event = state
        .registry
        .increase_allowance(&ledger, owner, spender, delta)?;
    state.save()?;

    println!("✅ Allowance increased by {}", delta);
    println!("   New allowance: {}", event.amount);

    Ok(())
}

/// Lower a spender's allowance
pub fn cmd_decrease_allowance(
    state: &mut AppState,
    ledger: &str,
    owner: &str,
    spender: &str,
    delta: &str,
) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let owner = parse_address(owner)?;
    let spender = parse_address(spender)?;
    let delta = parse_amount(delta)?;

    let event = state
        .registry
        .decrease_allowance(&ledger, owner, spender, delta)?;
    state.save()?;

    println!("✅ Allowance decreased by {}", delta);
    println!("   New allowance: {}", event.amount);

    Ok(())
}

/// Delegated transfer out of an owner's balance
pub fn cmd_transfer_from(
    state: &mut AppState,
    ledger: &str,
    spender: &str,
    owner: &str,
    to: &str,
    amount: &str,
) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let spender = parse_address(spender)?;
    let owner = parse_address(owner)?;
    let to = parse_address(to)?;
    let amount = parse_amount(amount)?;

    let (transfer, approval) = state
        .registry
        .transfer_from(&ledger, spender, owner, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} tokens on behalf of {}", transfer.amount, owner);
    println!("   {} -> {}", transfer.from, transfer.to);
    println!("   Remaining allowance: {}", approval.amount);

    Ok(())
}

/// Show an account balance
pub fn cmd_balance(state: &AppState, ledger: &str, account: &str) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let account = parse_address(account)?;

    let balance = state.registry.balance_of(&ledger, account)?;

    println!("💰 Balance of {}: {}", account, balance);

    Ok(())
}

/// Show a spender's allowance
pub fn cmd_allowance(state: &AppState, ledger: &str, owner: &str, spender: &str) -> CliResult<()> {
    let ledger = parse_address(ledger)?;
    let owner = parse_address(owner)?;
    let spender = parse_address(spender)?;

    let allowance = state.registry.allowance(&ledger, owner, spender)?;

    println!("🔓 Allowance of {} for {}: {}", owner, spender, allowance);

    Ok(())
}

/// List all deployed ledgers
pub fn cmd_list(state: &AppState) -> CliResult<()> {
    let ledgers = state.registry.list();

    if ledgers.is_empty() {
        println!("🪙 No ledgers deployed yet.");
        return Ok(());
    }

    println!("🪙 Deployed ledgers ({}):", ledgers.len());
    for (address, ledger) in ledgers {
        println!(
            "   {} - {} ({}), supply {}",
            address,
            ledger.name(),
            ledger.symbol(),
            ledger.total_supply()
        );
    }

    Ok(())
}

/// Show ledger details
pub fn cmd_info(state: &AppState, ledger: &str) -> CliResult<()> {
    let address = parse_address(ledger)?;

    let ledger = state
        .registry
        .get(&address)
        .ok_or_else(|| format!("Ledger not found: {}", address))?;

    println!("🪙 Ledger: {}", address);
    println!("   Name: {}", ledger.name());
    println!("   Symbol: {}", ledger.symbol());
    println!("   Decimals: {}", ledger.decimals());
    println!("   Total supply: {}", ledger.total_supply());
    println!("   Holders: {}", ledger.holder_count());
    println!("   Recorded events: {}", ledger.events().len());

    Ok(())
}

/// Show recent ledger events, newest first
pub fn cmd_history(state: &AppState, ledger: &str, count: usize) -> CliResult<()> {
    let address = parse_address(ledger)?;
    let events = state.registry.events(&address)?;

    if events.is_empty() {
        println!("📜 No events recorded for {}", address);
        return Ok(());
    }

    println!("📜 Events for {} (showing up to {}):", address, count);
    for event in events.iter().rev().take(count) {
        match event {
            Event::Transfer(e) => {
                println!(
                    "   [{}] Transfer {} -> {} ({})",
                    e.timestamp, e.from, e.to, e.amount
                );
            }
            Event::Approval(e) => {
                println!(
                    "   [{}] Approval {} allows {} ({})",
                    e.timestamp, e.owner, e.spender, e.amount
                );
            }
        }
    }

    Ok(())
}
