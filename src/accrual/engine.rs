//! Day-by-day simple interest accrual over a date window

use std::num::NonZeroU32;

use chrono::NaiveDate;
use log::{debug, trace};
use rust_decimal::Decimal;

use crate::dates::each_day;
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::rules::RuleTable;
use super::result::{AccrualResult, DailyAccrual};

/// Days per year used to annualize the summed daily interest
pub const DEFAULT_DAY_COUNT_BASIS: NonZeroU32 = match NonZeroU32::new(365) {
    Some(basis) => basis,
    None => unreachable!(),
};

/// Configuration for an accrual run
#[derive(Debug, Clone)]
pub struct AccrualConfig {
    /// Divisor applied to the summed daily interest
    pub day_count_basis: NonZeroU32,

    /// Whether to keep one `DailyAccrual` row per day in the result
    pub keep_daily_detail: bool,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            day_count_basis: DEFAULT_DAY_COUNT_BASIS,
            keep_daily_detail: false,
        }
    }
}

/// Combines a ledger and a rule table into accrued interest
#[derive(Debug, Clone, Default)]
pub struct AccrualEngine {
    config: AccrualConfig,
}

impl AccrualEngine {
    pub fn new(config: AccrualConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AccrualConfig {
        &self.config
    }

    /// Interest accrued over `[start, end]`, inclusive on both ends.
    ///
    /// Each day contributes `balance_as_of(day) * rate(day) / 100`; the sum is
    /// divided by the day-count basis. Both the balance and the rate may
    /// change on any day, so there is no segment shortcut. A day without a
    /// rule in effect fails the whole computation.
    pub fn accrue(
        &self,
        ledger: &Ledger,
        rules: &RuleTable,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccrualResult> {
        let closing_balance = ledger.balance_as_of(end);
        if start > end {
            debug!("Empty accrual window {start}..={end}");
            return Ok(AccrualResult::empty(start, end, closing_balance));
        }

        // One iteration represents exactly one day
        let days_per_step = Decimal::ONE;
        let mut total = Decimal::ZERO;
        let mut days = Vec::new();

        for date in each_day(start, end) {
            let balance = ledger.balance_as_of(date);
            let rule = rules
                .rule_in_effect(date)
                .ok_or(LedgerError::NoApplicableRule { date })?;

            let daily_interest = balance * rule.rate_fraction() * days_per_step;
            total += daily_interest;

            trace!("{date}: balance={balance} rule={} rate={}% interest={daily_interest}", rule.id, rule.rate_percent);

            if self.config.keep_daily_detail {
                days.push(DailyAccrual {
                    date,
                    balance,
                    rule_id: rule.id.clone(),
                    rate_percent: rule.rate_percent,
                    daily_interest,
                });
            }
        }

        let accrued_interest = total / Decimal::from(self.config.day_count_basis.get());
        debug!(
            "Accrued {accrued_interest} over {start}..={end} (daily sum {total}, closing balance {closing_balance})"
        );

        Ok(AccrualResult {
            start,
            end,
            accrued_interest,
            closing_balance,
            post_interest_balance: closing_balance + accrued_interest,
            days,
        })
    }

    /// Accrued interest only
    pub fn compute_accrued_interest(
        &self,
        ledger: &Ledger,
        rules: &RuleTable,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal> {
        Ok(self.accrue(ledger, rules, start, end)?.accrued_interest)
    }
}

/// Accrued interest over `[start, end]` with the default 365-day basis
pub fn compute_accrued_interest(
    ledger: &Ledger,
    rules: &RuleTable,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Decimal> {
    AccrualEngine::default().compute_accrued_interest(ledger, rules, start, end)
}
