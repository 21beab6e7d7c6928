//! Render the monthly statement of every account in a seeded bank
//!
//! Usage: cargo run --bin batch_statements -- --transactions txns.csv --rules rules.csv --month 06 [--json [--daily]]
//!
//! Accounts are independent, so statements are built in parallel over a
//! read-only bank. Accounts whose statement fails (e.g. no interest rule for a
//! day in the month) are reported and skipped.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use gic_ledger::bank::{load_rules, load_transactions};
use gic_ledger::input::parse_period;
use gic_ledger::{AccrualConfig, Bank, Statement};

#[derive(Parser)]
#[command(name = "batch_statements")]
#[command(author, version, about = "Monthly statements for every account", long_about = None)]
struct Cli {
    /// CSV of transactions (Date,Account,Type,Amount)
    #[arg(long)]
    transactions: PathBuf,

    /// CSV of interest rules (Date,RuleId,Rate)
    #[arg(long)]
    rules: PathBuf,

    /// Statement month: MM (year taken per account) or YYYYMM
    #[arg(long)]
    month: String,

    /// Emit JSON instead of text tables
    #[arg(long)]
    json: bool,

    /// Include per-day accrual rows and a summary in the JSON output
    #[arg(long, requires = "json")]
    daily: bool,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct BatchFailure {
    account: String,
    error: String,
}

#[derive(Serialize)]
struct BatchOutput {
    month: String,
    statements: Vec<Statement>,
    failures: Vec<BatchFailure>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let period = parse_period(&cli.month).context("Invalid --month")?;

    let mut bank = Bank::with_config(AccrualConfig {
        keep_daily_detail: cli.daily,
        ..AccrualConfig::default()
    });
    load_rules(&mut bank, &cli.rules)
        .with_context(|| format!("Failed to load rules from {}", cli.rules.display()))?;
    load_transactions(&mut bank, &cli.transactions)
        .with_context(|| format!("Failed to load transactions from {}", cli.transactions.display()))?;

    let accounts: Vec<&str> = bank.accounts().map(|a| a.account_number.as_str()).collect();
    info!(
        "Building {} statements (day-count basis {})",
        accounts.len(),
        bank.engine().config().day_count_basis
    );

    let results: Vec<(String, gic_ledger::Result<Statement>)> = accounts
        .par_iter()
        .map(|account| (account.to_string(), bank.statement(account, period)))
        .collect();

    let mut statements = Vec::new();
    let mut failures = Vec::new();
    for (account, result) in results {
        match result {
            Ok(statement) => statements.push(statement),
            Err(err) => {
                warn!("Skipping {account}: {err}");
                failures.push(BatchFailure {
                    account,
                    error: err.to_string(),
                });
            }
        }
    }

    let (built, failed) = (statements.len(), failures.len());

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("Failed to create {}", path.display()))?),
        None => Box::new(io::stdout().lock()),
    };

    if cli.json {
        let output = BatchOutput {
            month: cli.month.clone(),
            statements,
            failures,
        };
        serde_json::to_writer_pretty(&mut out, &output).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for statement in &statements {
            writeln!(out, "{statement}")?;
            writeln!(out)?;
        }
        for failure in &failures {
            writeln!(out, "Account {}: {}", failure.account, failure.error)?;
        }
    }

    info!("{built} statements, {failed} failures in {:?}", start.elapsed());
    Ok(())
}
