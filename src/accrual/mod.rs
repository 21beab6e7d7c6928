//! Interest accrual over date windows

mod engine;
mod result;

pub use engine::{compute_accrued_interest, AccrualConfig, AccrualEngine, DEFAULT_DAY_COUNT_BASIS};
pub use result::{AccrualResult, AccrualSummary, DailyAccrual};
