//! Interest rules keyed by effective date

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::rule::InterestRule;

/// At most one rule per effective date, ordered by date
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: BTreeMap<NaiveDate, InterestRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, replacing (and returning) any rule with the same effective date
    pub fn upsert(&mut self, rule: InterestRule) -> Option<InterestRule> {
        self.rules.insert(rule.effective_date, rule)
    }

    /// The rule with the greatest effective date on or before `date`
    pub fn rule_in_effect(&self, date: NaiveDate) -> Option<&InterestRule> {
        self.rules.range(..=date).next_back().map(|(_, rule)| rule)
    }

    /// Rules in effective-date order
    pub fn iter(&self) -> impl Iterator<Item = &InterestRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<InterestRule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = InterestRule>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for rule in iter {
            table.upsert(rule);
        }
        table
    }
}
