//! Per-account transaction ledger and balance queries

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::transaction::Transaction;

/// Dated transactions of one account, kept in insertion order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. Validation belongs to the caller.
    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Balance at the end of `date`: every transaction dated on or before it counts
    pub fn balance_as_of(&self, date: NaiveDate) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.date <= date)
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Balance at the start of `date`, before any of that day's transactions
    pub fn balance_before(&self, date: NaiveDate) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.date < date)
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Balance over every stored transaction
    pub fn balance(&self) -> Decimal {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions sorted by date; same-day entries keep insertion order
    pub fn in_date_order(&self) -> Vec<&Transaction> {
        let mut ordered: Vec<&Transaction> = self.transactions.iter().collect();
        ordered.sort_by_key(|t| t.date);
        ordered
    }

    /// Date-ordered transactions falling in one calendar month
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&Transaction> {
        self.in_date_order()
            .into_iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect()
    }

    /// Number of transactions dated exactly `date`
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.transactions.iter().filter(|t| t.date == date).count()
    }

    /// Latest transaction date, optionally restricted to one month of any year
    pub fn latest_date(&self, month: Option<u32>) -> Option<NaiveDate> {
        self.transactions
            .iter()
            .map(|t| t.date)
            .filter(|d| month.map_or(true, |m| d.month() == m))
            .max()
    }

    /// Running balances in date order with `candidate` slotted in
    fn replay_with<'a>(&'a self, candidate: &'a Transaction) -> impl Iterator<Item = Decimal> + 'a {
        let mut ordered: Vec<&Transaction> = self.transactions.iter().chain(std::iter::once(candidate)).collect();
        ordered.sort_by_key(|t| t.date);

        let mut running = Decimal::ZERO;
        ordered.into_iter().map(move |t| {
            running += t.signed_amount();
            running
        })
    }

    /// Whether the running balance, replayed in date order with `candidate`
    /// appended, stays at or above zero at every step.
    ///
    /// Returns the lowest running balance reached when it does not.
    pub fn check_non_negative_with(&self, candidate: &Transaction) -> Result<(), Decimal> {
        let lowest = self.replay_with(candidate).fold(Decimal::ZERO, Decimal::min);
        if lowest < Decimal::ZERO {
            Err(lowest)
        } else {
            Ok(())
        }
    }

    /// Highest running balance reached once `candidate` is slotted in by date
    pub fn peak_balance_with(&self, candidate: &Transaction) -> Decimal {
        self.replay_with(candidate).fold(Decimal::ZERO, Decimal::max)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(date: NaiveDate, kind: TransactionKind, amount: Decimal) -> Transaction {
        Transaction::new(Transaction::id_for(date, 1), date, kind, amount)
    }

    fn june_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(tx(ymd(2023, 5, 5), TransactionKind::Deposit, dec!(100)));
        ledger.add(tx(ymd(2023, 6, 1), TransactionKind::Deposit, dec!(150)));
        ledger.add(tx(ymd(2023, 6, 26), TransactionKind::Withdrawal, dec!(20)));
        ledger.add(tx(ymd(2023, 6, 26), TransactionKind::Withdrawal, dec!(100)));
        ledger
    }

    #[test]
    fn test_balance_as_of_includes_same_day() {
        let ledger = june_ledger();
        assert_eq!(ledger.balance_as_of(ymd(2023, 6, 1)), dec!(250));
        assert_eq!(ledger.balance_as_of(ymd(2023, 5, 31)), dec!(100));
        assert_eq!(ledger.balance_as_of(ymd(2023, 6, 26)), dec!(130));
        assert_eq!(ledger.balance_before(ymd(2023, 6, 1)), dec!(100));
        assert_eq!(ledger.balance_before(ymd(2023, 6, 26)), dec!(250));
    }

    #[test]
    fn test_balance_before_first_transaction_is_zero() {
        let ledger = june_ledger();
        assert_eq!(ledger.balance_as_of(ymd(2023, 1, 1)), Decimal::ZERO);
        assert_eq!(Ledger::new().balance_as_of(ymd(2023, 6, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_total_balance() {
        assert_eq!(june_ledger().balance(), dec!(130));
    }

    #[test]
    fn test_date_order_is_stable() {
        let mut ledger = Ledger::new();
        let late = ymd(2023, 6, 10);
        let early = ymd(2023, 6, 2);
        ledger.add(Transaction::new("a", late, TransactionKind::Deposit, dec!(1)));
        ledger.add(Transaction::new("b", early, TransactionKind::Deposit, dec!(2)));
        ledger.add(Transaction::new("c", late, TransactionKind::Deposit, dec!(3)));

        let ids: Vec<_> = ledger.in_date_order().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_month_queries() {
        let ledger = june_ledger();
        assert_eq!(ledger.in_month(2023, 6).len(), 3);
        assert_eq!(ledger.in_month(2023, 5).len(), 1);
        assert!(ledger.in_month(2022, 6).is_empty());
        assert_eq!(ledger.count_on(ymd(2023, 6, 26)), 2);
        assert_eq!(ledger.latest_date(Some(5)), Some(ymd(2023, 5, 5)));
        assert_eq!(ledger.latest_date(None), Some(ymd(2023, 6, 26)));
        assert_eq!(ledger.latest_date(Some(7)), None);
    }

    #[test]
    fn test_backdated_withdrawal_detected() {
        let ledger = june_ledger();

        // 130 left at the end, but only 100 existed before June 1
        let backdated = tx(ymd(2023, 5, 20), TransactionKind::Withdrawal, dec!(120));
        assert_eq!(ledger.check_non_negative_with(&backdated), Err(dec!(-20)));

        let fine = tx(ymd(2023, 6, 30), TransactionKind::Withdrawal, dec!(130));
        assert_eq!(ledger.check_non_negative_with(&fine), Ok(()));
    }

    #[test]
    fn test_peak_balance_with_backdated_deposit() {
        let ledger = june_ledger();

        // Lands before the June withdrawals, so the peak is 250 + 50
        let backdated = tx(ymd(2023, 6, 10), TransactionKind::Deposit, dec!(50));
        assert_eq!(ledger.peak_balance_with(&backdated), dec!(300));

        let late = tx(ymd(2023, 7, 1), TransactionKind::Deposit, dec!(50));
        assert_eq!(ledger.peak_balance_with(&late), dec!(250));
    }
}
