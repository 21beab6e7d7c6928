//! Monthly statements and console tables
//!
//! A statement lists the account's transactions inside the month with a
//! running balance, followed by one interest line dated the last day of the
//! month. The interest line carries the accrued amount and the post-interest
//! balance produced by the accrual engine.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::accrual::{AccrualEngine, AccrualSummary, DailyAccrual};
use crate::dates::format_date;
use crate::error::Result;
use crate::ledger::{Account, Transaction};
use crate::rules::RuleTable;

/// Month a statement is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementPeriod {
    /// `MM`: the year is taken from the account's own transactions
    Month(u32),
    /// `YYYYMM`
    YearMonth(i32, u32),
}

/// One transaction row with the balance after it
#[derive(Debug, Clone, Serialize)]
pub struct StatementLine {
    pub date: NaiveDate,
    pub txn_id: String,
    /// `D` or `W`
    pub kind: String,
    pub amount: Decimal,
    pub balance: Decimal,
}

/// Closing interest credit for the period
#[derive(Debug, Clone, Serialize)]
pub struct InterestLine {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub account_number: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Balance before the first day of the period
    pub opening_balance: Decimal,
    pub lines: Vec<StatementLine>,
    pub interest: InterestLine,

    /// Per-day accrual, present when the engine keeps daily detail
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub daily: Vec<DailyAccrual>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<AccrualSummary>,
}

impl Statement {
    /// Build the statement for `[start, end]`; fails if any day lacks an interest rule
    pub fn build(
        account: &Account,
        rules: &RuleTable,
        engine: &AccrualEngine,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        let ledger = &account.ledger;
        let opening_balance = ledger.balance_before(start);

        let mut running = opening_balance;
        let lines = ledger
            .in_date_order()
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .map(|t| {
                running += t.signed_amount();
                StatementLine::from_transaction(t, running)
            })
            .collect();

        let accrual = engine.accrue(ledger, rules, start, end)?;
        let summary = (!accrual.days.is_empty()).then(|| accrual.summary());

        Ok(Self {
            account_number: account.account_number.clone(),
            start,
            end,
            opening_balance,
            lines,
            interest: InterestLine {
                date: end,
                amount: accrual.accrued_interest,
                balance: accrual.post_interest_balance,
            },
            daily: accrual.days,
            summary,
        })
    }
}

impl StatementLine {
    fn from_transaction(t: &Transaction, balance: Decimal) -> Self {
        Self {
            date: t.date,
            txn_id: t.id.clone(),
            kind: t.kind.code().to_string(),
            amount: t.amount,
            balance,
        }
    }
}

/// Two-decimal rendering, half away from zero
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account: {}", self.account_number)?;
        writeln!(f, "Date     | Txn Id      | Type | Amount | Balance |")?;
        for line in &self.lines {
            writeln!(
                f,
                "{} | {:<11} | {:<4} | {:>6} | {:>7} |",
                format_date(line.date),
                line.txn_id,
                line.kind,
                format_money(line.amount),
                format_money(line.balance),
            )?;
        }
        write!(
            f,
            "{} | {:<11} | {:<4} | {:>6} | {:>7} |",
            format_date(self.interest.date),
            "",
            "I",
            format_money(self.interest.amount),
            format_money(self.interest.balance),
        )
    }
}

/// Transaction table printed after a transaction is accepted
pub fn render_account(account: &Account) -> String {
    let mut out = format!("Account: {}\n", account.account_number);
    out.push_str("Date     | Txn Id      | Type | Amount |");
    for t in account.ledger.in_date_order() {
        out.push_str(&format!(
            "\n{} | {:<11} | {:<4} | {:>6} |",
            format_date(t.date),
            t.id,
            t.kind.code(),
            format_money(t.amount),
        ));
    }
    out
}

/// Rule table printed after a rule is defined
pub fn render_rules(rules: &RuleTable) -> String {
    let mut out = String::from("Interest rules:\n");
    out.push_str("Date     | RuleId | Rate (%) |");
    for rule in rules.iter() {
        out.push_str(&format!(
            "\n{} | {:<6} | {:>8} |",
            format_date(rule.effective_date),
            rule.id,
            format_money(rule.rate_percent),
        ));
    }
    out
}
