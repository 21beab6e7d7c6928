//! Property tests for balance queries, rule lookup and accrual

use chrono::{Days, NaiveDate};
use gic_ledger::{compute_accrued_interest, InterestRule, Ledger, RuleTable, Transaction, TransactionKind};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// (day offset, is deposit, amount in cents)
fn arb_entries() -> impl Strategy<Value = Vec<(u64, bool, i64)>> {
    prop::collection::vec((0u64..90, any::<bool>(), 1i64..1_000_000), 0..40)
}

/// (day offset, rate in hundredths of a percent)
fn arb_rules() -> impl Strategy<Value = Vec<(u64, i64)>> {
    prop::collection::vec((0u64..90, 1i64..9_999), 1..10)
}

fn ledger_from(entries: &[(u64, bool, i64)]) -> Ledger {
    let mut ledger = Ledger::new();
    for &(offset, deposit, cents) in entries {
        let date = day(offset);
        let kind = if deposit { TransactionKind::Deposit } else { TransactionKind::Withdrawal };
        let id = Transaction::id_for(date, ledger.count_on(date) + 1);
        ledger.add(Transaction::new(id, date, kind, Decimal::new(cents, 2)));
    }
    ledger
}

fn rules_from(entries: &[(u64, i64)]) -> RuleTable {
    entries
        .iter()
        .map(|&(offset, bps)| InterestRule::new(day(offset), format!("R{offset}"), Decimal::new(bps, 2)).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn balance_ignores_insertion_order(entries in arb_entries(), query in 0u64..100, rotate in 0usize..40) {
        let forward = ledger_from(&entries);

        let mut shuffled = entries.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let by = rotate % shuffled.len();
            shuffled.rotate_left(by);
        }
        let reordered = ledger_from(&shuffled);

        let date = day(query);
        let expected: Decimal = entries
            .iter()
            .filter(|(offset, _, _)| day(*offset) <= date)
            .map(|&(_, deposit, cents)| if deposit { Decimal::new(cents, 2) } else { -Decimal::new(cents, 2) })
            .sum();

        prop_assert_eq!(forward.balance_as_of(date), expected);
        prop_assert_eq!(reordered.balance_as_of(date), expected);
    }

    #[test]
    fn rule_lookup_is_monotonic(rules in arb_rules(), a in 0u64..100, b in 0u64..100) {
        let table = rules_from(&rules);
        let (early, late) = (day(a.min(b)), day(a.max(b)));

        if let (Some(r1), Some(r2)) = (table.rule_in_effect(early), table.rule_in_effect(late)) {
            prop_assert!(r2.effective_date >= r1.effective_date);
        }
        if let Some(r) = table.rule_in_effect(late) {
            prop_assert!(r.effective_date <= late);
            // No other rule sits between the chosen one and the query date
            prop_assert!(table.iter().all(|other| other.effective_date <= r.effective_date || other.effective_date > late));
        }
    }

    #[test]
    fn single_day_accrual_matches_formula(entries in arb_entries(), rules in arb_rules(), query in 0u64..100) {
        let ledger = ledger_from(&entries);
        let table = rules_from(&rules);
        let date = day(query);

        match table.rule_in_effect(date) {
            Some(rule) => {
                let interest = compute_accrued_interest(&ledger, &table, date, date).unwrap();
                let expected = ledger.balance_as_of(date) * (rule.rate_percent / Decimal::ONE_HUNDRED) / Decimal::from(365);
                prop_assert_eq!(interest.round_dp(18), expected.round_dp(18));
            }
            None => prop_assert!(compute_accrued_interest(&ledger, &table, date, date).is_err()),
        }
    }

    #[test]
    fn accrual_is_repeatable(entries in arb_entries(), rules in arb_rules(), start in 0u64..60, len in 0u64..40) {
        let ledger = ledger_from(&entries);
        let table = rules_from(&rules);
        let (from, to) = (day(start), day(start + len));

        let first = compute_accrued_interest(&ledger, &table, from, to).ok();
        let second = compute_accrued_interest(&ledger, &table, from, to).ok();
        prop_assert_eq!(first, second);
    }
}
