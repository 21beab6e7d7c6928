//! `YYYYMMDD` boundary dates and calendar-month helpers

use chrono::{Days, NaiveDate};

use crate::error::{LedgerError, Result};

/// Wire format for every date that crosses the input boundary
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parse a strict 8-digit `YYYYMMDD` date.
///
/// The string must be calendar-valid and format back to exactly itself, so
/// inputs like `2023061` or `+2023061` never misparse into a real date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || LedgerError::InvalidDate { input: input.to_string() };

    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())?;
    if format_date(date) != input {
        return Err(invalid());
    }

    Ok(date)
}

/// Format a date as `YYYYMMDD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// First calendar day of the month, `None` if the month is out of range
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last calendar day of the month (handles leap Februaries)
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_day_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Every calendar day in `[start, end]`; empty when `start > end`
pub fn each_day(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut next = (start <= end).then_some(start);
    std::iter::from_fn(move || {
        let current = next?;
        next = current
            .checked_add_days(Days::new(1))
            .filter(|day| *day <= end);
        Some(current)
    })
}
