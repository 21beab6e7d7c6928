//! GIC Ledger - per-account transaction ledgers with date-ranged interest rules
//!
//! This library provides:
//! - Strict `YYYYMMDD` date handling at the input boundary
//! - Per-account ledgers with balance-as-of-date queries
//! - An interest rule table with "latest rule on or before" lookup
//! - Day-by-day interest accrual annualized over a 365-day year
//! - Monthly statements with a closing interest line
//! - Input line parsing and CSV seeding for the command-line front ends

pub mod accrual;
pub mod bank;
pub mod dates;
pub mod error;
pub mod input;
pub mod ledger;
pub mod rules;
pub mod session;
pub mod statement;

// Re-export commonly used types
pub use accrual::{compute_accrued_interest, AccrualConfig, AccrualEngine, AccrualResult};
pub use bank::Bank;
pub use error::{LedgerError, Result};
pub use ledger::{Account, Ledger, Transaction, TransactionKind};
pub use rules::{InterestRule, RuleTable};
pub use statement::{Statement, StatementPeriod};
