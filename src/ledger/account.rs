//! Account: an account number owning one ledger

use serde::Serialize;

use super::book::Ledger;

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub account_number: String,
    pub ledger: Ledger,
}

impl Account {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            ledger: Ledger::new(),
        }
    }
}
