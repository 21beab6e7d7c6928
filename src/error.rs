//! Error types for ledger, rule and accrual operations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Everything that can go wrong between an input line and a rendered statement
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or non-calendar `YYYYMMDD` string
    #[error("Invalid date '{input}'. Please enter a valid date in YYYYMMDD format.")]
    InvalidDate { input: String },

    /// No interest rule is in effect on a day of the accrual window
    #[error("No interest rule is in effect on {date}. Define a rule dated on or before it.")]
    NoApplicableRule { date: NaiveDate },

    /// Withdrawal would take the running balance below zero
    #[error("The transaction will cause the balance to go below 0 (needed {needed}, available {available}).")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Deposit would take the running balance above the supported ceiling
    #[error("The transaction will cause the balance to exceed {limit}.")]
    BalanceLimitExceeded { limit: Decimal },

    #[error("The first transaction on an account should not be a withdrawal.")]
    WithdrawalOnEmptyAccount,

    #[error("Invalid amount '{input}'. Amount must be a decimal number greater than zero.")]
    InvalidAmount { input: String },

    #[error("Invalid rate '{input}'. Rate should be greater than 0 and less than 100.")]
    InvalidRate { input: String },

    #[error("Invalid transaction type '{input}'. Use D for deposit or W for withdrawal.")]
    InvalidTransactionType { input: String },

    #[error("Invalid input format. Expected {expected}.")]
    InvalidFormat { expected: &'static str },

    #[error("Invalid month '{input}'. Use MM or YYYYMM.")]
    InvalidMonth { input: String },

    #[error("Account '{account}' not found. Please enter a valid account number.")]
    AccountNotFound { account: String },

    #[error("The {field} must not be empty.")]
    EmptyField { field: &'static str },

    /// A seed file row failed to parse or validate
    #[error("{path}, row {row}: {source}")]
    SeedRow {
        path: String,
        row: u64,
        #[source]
        source: Box<LedgerError>,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
