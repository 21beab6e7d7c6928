//! Interest rule definition

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};

/// Annual rate that applies from `effective_date` until a later rule supersedes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestRule {
    pub effective_date: NaiveDate,

    pub id: String,

    /// Annual percentage, strictly between 0 and 100
    pub rate_percent: Decimal,
}

impl InterestRule {
    /// Build a rule, rejecting rates outside (0, 100)
    pub fn new(effective_date: NaiveDate, id: impl Into<String>, rate_percent: Decimal) -> Result<Self> {
        if rate_percent <= Decimal::ZERO || rate_percent >= Decimal::ONE_HUNDRED {
            return Err(LedgerError::InvalidRate { input: rate_percent.to_string() });
        }

        Ok(Self {
            effective_date,
            id: id.into(),
            rate_percent,
        })
    }

    /// Rate as a fraction (1.95% -> 0.0195)
    pub fn rate_fraction(&self) -> Decimal {
        self.rate_percent / Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_bounds() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(InterestRule::new(date, "R1", dec!(1.95)).is_ok());
        assert!(InterestRule::new(date, "R1", dec!(99.99)).is_ok());

        for rate in [dec!(0), dec!(-1), dec!(100), dec!(150)] {
            assert!(matches!(
                InterestRule::new(date, "R1", rate),
                Err(LedgerError::InvalidRate { .. })
            ));
        }
    }

    #[test]
    fn test_rate_fraction() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let rule = InterestRule::new(date, "R1", dec!(1.95)).unwrap();
        assert_eq!(rule.rate_fraction(), dec!(0.0195));
    }
}
