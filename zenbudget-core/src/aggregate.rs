//! Aggregator: turns debit transactions into per-category current-week
//! totals and historical averages.
//!
//! Grouping is keyed by category label and kept in a `BTreeMap`, so the
//! output order is lexicographic and deterministic. The reallocator relies
//! on that order to break ties between equal differences.

use crate::record::TransactionRecord;
use crate::week::WeekRule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current-week spend and historical average for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAggregate {
    pub category: String,
    pub current: f64,
    pub average: f64,
    /// `current - average`
    pub difference: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    current: f64,
    average: f64,
}

/// Outer join of current-week sums and past means, one entry per category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: BTreeMap<String, Totals>,
}

impl CategoryTotals {
    /// Build directly from `(category, current, average)` triples.
    /// A repeated category keeps the last triple.
    pub fn from_entries<S: Into<String>>(entries: impl IntoIterator<Item = (S, f64, f64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(category, current, average)| (category.into(), Totals { current, average }))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, category: &str) -> Option<CategoryAggregate> {
        self.entries
            .get_key_value(category)
            .map(|(k, t)| to_aggregate(k, t))
    }

    /// Rows in category order
    pub fn aggregates(&self) -> impl Iterator<Item = CategoryAggregate> + '_ {
        self.entries.iter().map(|(k, t)| to_aggregate(k, t))
    }
}

fn to_aggregate(category: &str, t: &Totals) -> CategoryAggregate {
    CategoryAggregate {
        category: category.to_string(),
        current: t.current,
        average: t.average,
        difference: t.current - t.average,
    }
}

/// Counters describing one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub records: usize,
    pub debits: usize,
    pub current_week: usize,
    pub past: usize,
}

/// Aggregate `records` relative to the week containing `today`.
pub fn aggregate(records: &[TransactionRecord], rule: WeekRule, today: NaiveDate) -> CategoryTotals {
    aggregate_with_stats(records, rule, today).0
}

/// Same as [`aggregate`], also returning pass counters.
pub fn aggregate_with_stats(
    records: &[TransactionRecord],
    rule: WeekRule,
    today: NaiveDate,
) -> (CategoryTotals, AggregationStats) {
    let mut stats = AggregationStats {
        records: records.len(),
        ..Default::default()
    };

    let mut current: BTreeMap<&str, f64> = BTreeMap::new();
    // (sum, count) per category, reduced to a mean below
    let mut past: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_debit()) {
        stats.debits += 1;
        let category = record.spend_type.as_str();

        if rule.same_week(record.day(), today) {
            stats.current_week += 1;
            *current.entry(category).or_insert(0.0) += record.amount;
        } else {
            stats.past += 1;
            let slot = past.entry(category).or_insert((0.0, 0));
            slot.0 += record.amount;
            slot.1 += 1;
        }
    }

    let mut entries: BTreeMap<String, Totals> = BTreeMap::new();
    for (category, sum) in current {
        entries.entry(category.to_string()).or_default().current = sum;
    }
    for (category, (sum, count)) in past {
        entries.entry(category.to_string()).or_default().average = sum / count as f64;
    }

    (CategoryTotals { entries }, stats)
}
