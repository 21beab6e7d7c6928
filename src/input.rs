//! Parsing of `|`-separated input lines into typed requests

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::dates::parse_date;
use crate::error::{LedgerError, Result};
use crate::ledger::TransactionKind;
use crate::rules::InterestRule;
use crate::statement::StatementPeriod;

pub const TRANSACTION_FORMAT: &str = "<Date>|<Account>|<Type>|<Amount>";
pub const RULE_FORMAT: &str = "<Date>|<RuleId>|<Rate in %>";
pub const STATEMENT_FORMAT: &str = "<Account>|<Month>";

/// A deposit or withdrawal that has not been validated against the ledger yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub date: NaiveDate,
    pub account: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub account: String,
    pub period: StatementPeriod,
}

fn split_fields<'a>(line: &'a str, count: usize, expected: &'static str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if fields.len() != count {
        return Err(LedgerError::InvalidFormat { expected });
    }
    Ok(fields)
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        Err(LedgerError::EmptyField { field })
    } else {
        Ok(value)
    }
}

/// Positive decimal amount
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let invalid = || LedgerError::InvalidAmount { input: input.to_string() };
    let amount = Decimal::from_str(input.trim()).map_err(|_| invalid())?;
    if amount <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(amount)
}

/// Percentage strictly between 0 and 100
pub fn parse_rate(input: &str) -> Result<Decimal> {
    let invalid = || LedgerError::InvalidRate { input: input.to_string() };
    let rate = Decimal::from_str(input.trim()).map_err(|_| invalid())?;
    if rate <= Decimal::ZERO || rate >= Decimal::ONE_HUNDRED {
        return Err(invalid());
    }
    Ok(rate)
}

/// `MM` (or `M`) for a month of the account's own year, `YYYYMM` for an explicit year
pub fn parse_period(input: &str) -> Result<StatementPeriod> {
    let invalid = || LedgerError::InvalidMonth { input: input.to_string() };
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let (year, month) = match trimmed.len() {
        1 | 2 => (None, trimmed.parse::<u32>().map_err(|_| invalid())?),
        6 => (
            Some(trimmed[..4].parse::<i32>().map_err(|_| invalid())?),
            trimmed[4..].parse::<u32>().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok(match year {
        Some(year) => StatementPeriod::YearMonth(year, month),
        None => StatementPeriod::Month(month),
    })
}

/// `<Date>|<Account>|<Type>|<Amount>`
pub fn parse_transaction_line(line: &str) -> Result<TransactionRequest> {
    let fields = split_fields(line, 4, TRANSACTION_FORMAT)?;
    Ok(TransactionRequest {
        date: parse_date(fields[0])?,
        account: non_empty(fields[1], "account number")?.to_string(),
        kind: TransactionKind::from_code(fields[2])?,
        amount: parse_amount(fields[3])?,
    })
}

/// `<Date>|<RuleId>|<Rate in %>`
pub fn parse_rule_line(line: &str) -> Result<InterestRule> {
    let fields = split_fields(line, 3, RULE_FORMAT)?;
    let date = parse_date(fields[0])?;
    let id = non_empty(fields[1], "rule id")?;
    let rate = parse_rate(fields[2])?;
    InterestRule::new(date, id, rate)
}

/// `<Account>|<Month>`
pub fn parse_statement_line(line: &str) -> Result<StatementRequest> {
    let fields = split_fields(line, 2, STATEMENT_FORMAT)?;
    Ok(StatementRequest {
        account: non_empty(fields[0], "account number")?.to_string(),
        period: parse_period(fields[1])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_transaction_line() {
        let req = parse_transaction_line(" 20230626 | AC001 | w | 100.00 ").unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2023, 6, 26).unwrap());
        assert_eq!(req.account, "AC001");
        assert_eq!(req.kind, TransactionKind::Withdrawal);
        assert_eq!(req.amount, dec!(100));
    }

    #[test]
    fn test_transaction_line_errors() {
        assert!(matches!(
            parse_transaction_line("20230626|AC001|D"),
            Err(LedgerError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_transaction_line("20230631|AC001|D|10"),
            Err(LedgerError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_transaction_line("20230626||D|10"),
            Err(LedgerError::EmptyField { .. })
        ));
        assert!(matches!(
            parse_transaction_line("20230626|AC001|X|10"),
            Err(LedgerError::InvalidTransactionType { .. })
        ));
        for amount in ["0", "-5", "ten", ""] {
            assert!(matches!(
                parse_transaction_line(&format!("20230626|AC001|D|{amount}")),
                Err(LedgerError::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_parse_rule_line() {
        let rule = parse_rule_line("20230615|RULE03|2.20").unwrap();
        assert_eq!(rule.id, "RULE03");
        assert_eq!(rule.rate_percent, dec!(2.20));

        for rate in ["0", "100", "abc", "-1"] {
            assert!(matches!(
                parse_rule_line(&format!("20230615|RULE03|{rate}")),
                Err(LedgerError::InvalidRate { .. })
            ));
        }
        assert!(matches!(parse_rule_line("20230615|RULE03"), Err(LedgerError::InvalidFormat { .. })));
    }

    #[test]
    fn test_parse_statement_line() {
        let req = parse_statement_line("AC001|06").unwrap();
        assert_eq!(req.account, "AC001");
        assert_eq!(req.period, StatementPeriod::Month(6));

        let req = parse_statement_line("AC001|202306").unwrap();
        assert_eq!(req.period, StatementPeriod::YearMonth(2023, 6));

        for month in ["13", "00", "2023", "June", "", "202313"] {
            assert!(matches!(
                parse_statement_line(&format!("AC001|{month}")),
                Err(LedgerError::InvalidMonth { .. })
            ));
        }
    }
}
