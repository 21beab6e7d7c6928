//! Dated deposits and withdrawals

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};

/// Direction of a ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Parse the one-letter input code (`D` / `W`, case-insensitive)
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "D" => Ok(TransactionKind::Deposit),
            "W" => Ok(TransactionKind::Withdrawal),
            _ => Err(LedgerError::InvalidTransactionType { input: code.to_string() }),
        }
    }

    /// One-letter code used on statements
    pub fn code(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "D",
            TransactionKind::Withdrawal => "W",
        }
    }

    /// Apply the direction to a positive amount
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

/// A single immutable ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// `YYMMDD-NN`, unique within one account
    pub id: String,

    /// Value date
    pub date: NaiveDate,

    pub kind: TransactionKind,

    /// Always positive; the kind carries the sign
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(id: impl Into<String>, date: NaiveDate, kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            date,
            kind,
            amount,
        }
    }

    /// Build the id for the `sequence`-th transaction of an account on `date` (1-based)
    pub fn id_for(date: NaiveDate, sequence: usize) -> String {
        format!("{}-{:02}", date.format("%y%m%d"), sequence)
    }

    /// Amount with deposit = +, withdrawal = -
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}
