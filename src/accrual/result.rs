//! Accrual output structures

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Interest contribution of a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAccrual {
    pub date: NaiveDate,

    /// End-of-day balance
    pub balance: Decimal,

    pub rule_id: String,
    pub rate_percent: Decimal,

    /// `balance * rate / 100` for one day, before annualization
    pub daily_interest: Decimal,
}

/// Interest accrued over a closed date window
#[derive(Debug, Clone, Serialize)]
pub struct AccrualResult {
    pub start: NaiveDate,
    pub end: NaiveDate,

    /// Sum of daily contributions divided by the day-count basis
    pub accrued_interest: Decimal,

    /// Ledger balance as of `end`, before interest
    pub closing_balance: Decimal,

    /// `closing_balance + accrued_interest`
    pub post_interest_balance: Decimal,

    /// Per-day detail (empty unless requested in the config)
    pub days: Vec<DailyAccrual>,
}

impl AccrualResult {
    /// Result for a window with no days in it
    pub fn empty(start: NaiveDate, end: NaiveDate, closing_balance: Decimal) -> Self {
        Self {
            start,
            end,
            accrued_interest: Decimal::ZERO,
            closing_balance,
            post_interest_balance: closing_balance,
            days: Vec::new(),
        }
    }

    /// Summary statistics over the daily detail
    pub fn summary(&self) -> AccrualSummary {
        let total_days = self.days.len() as u32;
        let rate_changes = self
            .days
            .windows(2)
            .filter(|pair| pair[0].rule_id != pair[1].rule_id)
            .count() as u32;
        let average_daily_balance = if total_days == 0 {
            Decimal::ZERO
        } else {
            self.days.iter().map(|d| d.balance).sum::<Decimal>() / Decimal::from(total_days)
        };

        AccrualSummary {
            total_days,
            rate_changes,
            average_daily_balance,
            accrued_interest: self.accrued_interest,
        }
    }
}

/// Summary statistics for an accrual window
#[derive(Debug, Clone, Serialize)]
pub struct AccrualSummary {
    pub total_days: u32,
    pub rate_changes: u32,
    pub average_daily_balance: Decimal,
    pub accrued_interest: Decimal,
}
