//! Token Ledger CLI Application
//!
//! A command-line interface for deploying and operating token ledgers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_ledger::cli::{self, AppState};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "An ERC20-style fungible token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize an empty ledger registry
    Init,

    /// Deploy a new token ledger
    Deploy {
        /// Token name
        #[arg(short, long)]
        name: String,

        /// Token symbol
        #[arg(short, long)]
        symbol: String,

        /// Deployer's account address
        #[arg(long)]
        deployer: String,
    },

    /// Mint tokens to an account
    Mint {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Recipient's account address
        #[arg(short, long)]
        to: String,

        /// Amount to mint
        #[arg(short, long)]
        amount: String,
    },

    /// Transfer tokens between accounts
    Transfer {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Sender's account address
        #[arg(short, long)]
        from: String,

        /// Recipient's account address
        #[arg(short, long)]
        to: String,

        /// Amount to transfer
        #[arg(short, long)]
        amount: String,
    },

    /// Set a spender's allowance
    Approve {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Owner's account address
        #[arg(short, long)]
        owner: String,

        /// Spender's account address
        #[arg(short, long)]
        spender: String,

        /// Allowance amount (overwrites any previous value)
        #[arg(short, long)]
        amount: String,
    },

    /// Raise a spender's allowance
    IncreaseAllowance {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Owner's account address
        #[arg(short, long)]
        owner: String,

        /// Spender's account address
        #[arg(short, long)]
        spender: String,

        /// Amount to add
        #[arg(short, long)]
        amount: String,
    },

    /// Lower a spender's allowance
    DecreaseAllowance {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Owner's account address
        #[arg(short, long)]
        owner: String,

        /// Spender's account address
        #[arg(short, long)]
        spender: String,

        /// Amount to subtract
        #[arg(short, long)]
        amount: String,
    },

    /// Transfer tokens out of an owner's balance on their behalf
    TransferFrom {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Spender's account address (must have allowance)
        #[arg(short, long)]
        spender: String,

        /// Owner's account address
        #[arg(short, long)]
        owner: String,

        /// Recipient's account address
        #[arg(short, long)]
        to: String,

        /// Amount to transfer
        #[arg(short, long)]
        amount: String,
    },

    /// Show an account balance
    Balance {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Account address
        #[arg(short, long)]
        account: String,
    },

    /// Show a spender's allowance
    Allowance {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Owner's account address
        #[arg(short, long)]
        owner: String,

        /// Spender's account address
        #[arg(short, long)]
        spender: String,
    },

    /// List all deployed ledgers
    List,

    /// Show ledger details
    Info {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,
    },

    /// Show recent ledger events
    History {
        /// Ledger address
        #[arg(short, long)]
        ledger: String,

        /// Number of events to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init separately (doesn't need full state)
    if let Commands::Init = &cli.command {
        return cli::cmd_init(&cli.data_dir);
    }

    // Initialize application state
    let mut state = AppState::new(cli.data_dir.clone())?;

    match cli.command {
        Commands::Init => unreachable!(),

        Commands::Deploy {
            name,
            symbol,
            deployer,
        } => {
            cli::cmd_deploy(&mut state, &name, &symbol, &deployer)?;
        }

        Commands::Mint { ledger, to, amount } => {
            cli::cmd_mint(&mut state, &ledger, &to, &amount)?;
        }

        Commands::Transfer {
            ledger,
            from,
            to,
            amount,
        } => {
            cli::cmd_transfer(&mut state, &ledger, &from, &to, &amount)?;
        }

        Commands::Approve {
            ledger,
            owner,
            spender,
            amount,
        } => {
            cli::cmd_approve(&mut state, &ledger, &owner, &spender, &amount)?;
        }

        Commands::IncreaseAllowance {
            ledger,
            owner,
            spender,
            amount,
        } => {
            cli::cmd_increase_allowance(&mut state, &ledger, &owner, &spender, &amount)?;
        }

        Commands::DecreaseAllowance {
            ledger,
            owner,
            spender,
            amount,
        } => {
            cli::cmd_decrease_allowance(&mut state, &ledger, &owner, &spender, &amount)?;
        }

        Commands::TransferFrom {
            ledger,
            spender,
            owner,
            to,
            amount,
        } => {
            cli::cmd_transfer_from(&mut state, &ledger, &spender, &owner, &to, &amount)?;
        }

        Commands::Balance { ledger, account } => {
            cli::cmd_balance(&state, &ledger, &account)?;
        }

        Commands::Allowance {
            ledger,
            owner,
            spender,
        } => {
            cli::cmd_allowance(&state, &ledger, &owner, &spender)?;
        }

        Commands::List => {
            cli::cmd_list(&state)?;
        }

        Commands::Info { ledger } => {
            cli::cmd_info(&state, &ledger)?;
        }

        Commands::History { ledger, count } => {
            cli::cmd_history(&state, &ledger, count.max(1))?;
        }
    }

    Ok(())
}
