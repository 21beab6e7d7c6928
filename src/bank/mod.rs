//! In-memory bank: accounts, the shared rule table, validation and statements

pub mod loader;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::accrual::{AccrualConfig, AccrualEngine};
use crate::dates::{first_day_of_month, last_day_of_month};
use crate::error::{LedgerError, Result};
use crate::input::TransactionRequest;
use crate::ledger::{Account, Transaction, TransactionKind};
use crate::rules::{InterestRule, RuleTable};
use crate::statement::{Statement, StatementPeriod};

pub use loader::{load_rules, load_rules_from_reader, load_transactions, load_transactions_from_reader};

/// Ceiling on any account's running balance, in whole currency units.
///
/// Keeps every balance, daily interest product and window sum far inside the
/// range of `Decimal`.
pub const BALANCE_LIMIT: i64 = 1_000_000_000_000_000;

/// Owns every account and the rule table shared by all of them
#[derive(Debug, Clone, Default)]
pub struct Bank {
    accounts: BTreeMap<String, Account>,
    rules: RuleTable,
    engine: AccrualEngine,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AccrualConfig) -> Self {
        Self {
            engine: AccrualEngine::new(config),
            ..Self::default()
        }
    }

    /// Validate a transaction and add it to its account, creating the account on first use.
    ///
    /// Rejected requests leave the bank untouched.
    pub fn record_transaction(&mut self, request: TransactionRequest) -> Result<&Account> {
        if request.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { input: request.amount.to_string() });
        }

        let existing = self.accounts.get(&request.account);
        let sequence = existing.map_or(0, |a| a.ledger.count_on(request.date)) + 1;
        let transaction = Transaction::new(
            Transaction::id_for(request.date, sequence),
            request.date,
            request.kind,
            request.amount,
        );

        if request.kind == TransactionKind::Withdrawal {
            let ledger_balance = existing.map_or(Decimal::ZERO, |a| a.ledger.balance());
            if ledger_balance.is_zero() {
                warn!("Rejected withdrawal on empty account {}", request.account);
                return Err(LedgerError::WithdrawalOnEmptyAccount);
            }
            if let Some(account) = existing {
                if let Err(lowest) = account.ledger.check_non_negative_with(&transaction) {
                    warn!(
                        "Rejected withdrawal of {} on {}: running balance would reach {lowest}",
                        request.amount, request.account
                    );
                    return Err(LedgerError::InsufficientBalance {
                        needed: request.amount,
                        available: request.amount + lowest,
                    });
                }
            }
        }

        if request.kind == TransactionKind::Deposit {
            let peak = existing.map_or(request.amount, |a| a.ledger.peak_balance_with(&transaction));
            let limit = Decimal::from(BALANCE_LIMIT);
            if peak > limit {
                warn!("Rejected deposit of {} on {}: balance would reach {peak}", request.amount, request.account);
                return Err(LedgerError::BalanceLimitExceeded { limit });
            }
        }

        info!(
            "Recorded {} {} {} on {} for {}",
            transaction.id,
            transaction.kind.code(),
            transaction.amount,
            transaction.date,
            request.account
        );

        let account = self
            .accounts
            .entry(request.account.clone())
            .or_insert_with(|| Account::new(request.account));
        account.ledger.add(transaction);
        Ok(account)
    }

    /// Add a rule, replacing any rule with the same effective date
    pub fn define_rule(&mut self, rule: InterestRule) -> Option<InterestRule> {
        info!("Interest rule {} at {}% from {}", rule.id, rule.rate_percent, rule.effective_date);
        let replaced = self.rules.upsert(rule);
        if let Some(old) = &replaced {
            debug!("Replaced rule {} dated {}", old.id, old.effective_date);
        }
        replaced
    }

    pub fn account(&self, account_number: &str) -> Result<&Account> {
        self.accounts
            .get(account_number)
            .ok_or_else(|| LedgerError::AccountNotFound { account: account_number.to_string() })
    }

    /// Accounts ordered by account number
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn engine(&self) -> &AccrualEngine {
        &self.engine
    }

    /// First and last calendar day of the statement month.
    ///
    /// For a bare month the year comes from the account's latest transaction in
    /// that month, falling back to the year of its latest transaction overall.
    pub fn resolve_period(&self, account: &Account, period: StatementPeriod) -> Result<(NaiveDate, NaiveDate)> {
        let (year, month) = match period {
            StatementPeriod::YearMonth(year, month) => (year, month),
            StatementPeriod::Month(month) => {
                let anchor = account
                    .ledger
                    .latest_date(Some(month))
                    .or_else(|| account.ledger.latest_date(None))
                    .ok_or_else(|| LedgerError::AccountNotFound {
                        account: account.account_number.clone(),
                    })?;
                (anchor.year(), month)
            }
        };

        let invalid = || LedgerError::InvalidMonth { input: format!("{year:04}{month:02}") };
        let start = first_day_of_month(year, month).ok_or_else(invalid)?;
        let end = last_day_of_month(year, month).ok_or_else(invalid)?;
        Ok((start, end))
    }

    /// Monthly statement with its closing interest line
    pub fn statement(&self, account_number: &str, period: StatementPeriod) -> Result<Statement> {
        let account = self.account(account_number)?;
        let (start, end) = self.resolve_period(account, period)?;
        debug!("Statement for {account_number} over {start}..={end}");
        Statement::build(account, &self.rules, &self.engine, start, end)
    }
}
