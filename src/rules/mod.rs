//! Date-ranged interest rules

mod rule;
mod table;

pub use rule::InterestRule;
pub use table::RuleTable;
