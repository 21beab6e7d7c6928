//! Seed a bank from CSV files
//!
//! Rows go through the same validation as interactive input, in file order.
//! The first bad row aborts the load.

use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::info;

use super::Bank;
use crate::dates::parse_date;
use crate::error::{LedgerError, Result};
use crate::input::{parse_amount, parse_rate, TransactionRequest};
use crate::ledger::TransactionKind;
use crate::rules::InterestRule;

/// Raw row of a transactions file: `Date,Account,Type,Amount`
#[derive(Debug, serde::Deserialize)]
struct TransactionRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Account")]
    account: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn to_request(&self) -> Result<TransactionRequest> {
        let account = self.account.trim();
        if account.is_empty() {
            return Err(LedgerError::EmptyField { field: "account number" });
        }
        Ok(TransactionRequest {
            date: parse_date(self.date.trim())?,
            account: account.to_string(),
            kind: TransactionKind::from_code(&self.kind)?,
            amount: parse_amount(&self.amount)?,
        })
    }
}

/// Raw row of a rules file: `Date,RuleId,Rate`
#[derive(Debug, serde::Deserialize)]
struct RuleRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "RuleId")]
    rule_id: String,
    #[serde(rename = "Rate")]
    rate: String,
}

impl RuleRow {
    fn to_rule(&self) -> Result<InterestRule> {
        let id = self.rule_id.trim();
        if id.is_empty() {
            return Err(LedgerError::EmptyField { field: "rule id" });
        }
        InterestRule::new(parse_date(self.date.trim())?, id, parse_rate(&self.rate)?)
    }
}

fn row_error(source: &str, row: usize, err: LedgerError) -> LedgerError {
    LedgerError::SeedRow {
        path: source.to_string(),
        row: row as u64 + 1,
        source: Box::new(err),
    }
}

/// Load transactions from a CSV file into the bank; returns the number recorded
pub fn load_transactions<P: AsRef<Path>>(bank: &mut Bank, path: P) -> Result<usize> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    load_transactions_from_reader(bank, file, &path.display().to_string())
}

/// Load transactions from any reader; `source` names it in errors
pub fn load_transactions_from_reader<R: Read>(bank: &mut Bank, reader: R, source: &str) -> Result<usize> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut count = 0;

    for (row, result) in csv_reader.deserialize::<TransactionRow>().enumerate() {
        let request = result
            .map_err(LedgerError::from)
            .and_then(|r| r.to_request())
            .map_err(|e| row_error(source, row, e))?;
        bank.record_transaction(request).map_err(|e| row_error(source, row, e))?;
        count += 1;
    }

    info!("Loaded {count} transactions from {source}");
    Ok(count)
}

/// Load interest rules from a CSV file into the bank; returns the number of rows applied
pub fn load_rules<P: AsRef<Path>>(bank: &mut Bank, path: P) -> Result<usize> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    load_rules_from_reader(bank, file, &path.display().to_string())
}

/// Load interest rules from any reader; `source` names it in errors
pub fn load_rules_from_reader<R: Read>(bank: &mut Bank, reader: R, source: &str) -> Result<usize> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut count = 0;

    for (row, result) in csv_reader.deserialize::<RuleRow>().enumerate() {
        let rule = result
            .map_err(LedgerError::from)
            .and_then(|r| r.to_rule())
            .map_err(|e| row_error(source, row, e))?;
        bank.define_rule(rule);
        count += 1;
    }

    info!("Loaded {count} interest rules from {source}");
    Ok(count)
}
