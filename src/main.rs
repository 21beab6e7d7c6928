//! GIC Ledger CLI
//!
//! Interactive menu for recording transactions, defining interest rules and
//! printing monthly statements. Optional CSV files seed the session.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gic_ledger::bank::{load_rules, load_transactions};
use gic_ledger::session::Session;
use gic_ledger::Bank;

/// AwesomeGIC Bank - interactive ledger and interest statements
#[derive(Parser)]
#[command(name = "gic_ledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV of transactions to load before starting (Date,Account,Type,Amount)
    #[arg(long)]
    transactions: Option<PathBuf>,

    /// CSV of interest rules to load before starting (Date,RuleId,Rate)
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut bank = Bank::new();
    if let Some(path) = &cli.rules {
        load_rules(&mut bank, path).with_context(|| format!("Failed to load rules from {}", path.display()))?;
    }
    if let Some(path) = &cli.transactions {
        load_transactions(&mut bank, path)
            .with_context(|| format!("Failed to load transactions from {}", path.display()))?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut bank, stdin.lock(), stdout.lock())
        .run()
        .context("Console I/O failed")?;

    Ok(())
}
