//! Reallocator: greedy matching of overspend against underspend.
//!
//! Overspent categories are visited largest difference first; each one
//! drains underspent categories most-negative first until it is covered.
//! Underspent remainders carry over between overspent categories.

use crate::aggregate::CategoryTotals;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

pub const NO_REALLOCATION_MESSAGE: &str = "No reallocation needed";

/// A proposed transfer of unspent budget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// Underspent category giving up headroom
    pub from: String,
    /// Overspent category being covered
    pub to: String,
    /// Always > 0, rounded to cents
    pub amount: f64,
}

/// Outcome of a reallocation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Reallocation {
    /// At least one transfer, in emission order
    Transfers(Vec<Suggestion>),
    NotNeeded,
}

impl Reallocation {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Reallocation::Transfers(s) => s,
            Reallocation::NotNeeded => &[],
        }
    }

    pub fn is_needed(&self) -> bool {
        matches!(self, Reallocation::Transfers(_))
    }
}

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
}

// Both variants serialize as a JSON array: the transfers, or a single
// message object.
impl Serialize for Reallocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reallocation::Transfers(suggestions) => suggestions.serialize(serializer),
            Reallocation::NotNeeded => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&Message {
                    message: NO_REALLOCATION_MESSAGE,
                })?;
                seq.end()
            }
        }
    }
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

struct Imbalance<'a> {
    category: &'a str,
    /// Unrounded; positive for overspent, negative for underspent
    remaining: f64,
}

/// Match overspent categories against underspent ones.
pub fn reallocate(totals: &CategoryTotals) -> Reallocation {
    let aggregates: Vec<_> = totals.aggregates().collect();

    let mut overspent: Vec<Imbalance> = aggregates
        .iter()
        .filter(|a| a.difference > 0.0)
        .map(|a| Imbalance {
            category: &a.category,
            remaining: a.difference,
        })
        .collect();
    let mut underspent: Vec<Imbalance> = aggregates
        .iter()
        .filter(|a| a.difference < 0.0)
        .map(|a| Imbalance {
            category: &a.category,
            remaining: a.difference,
        })
        .collect();

    // Stable sorts: equal differences keep category order
    overspent.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    underspent.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));

    let mut suggestions = Vec::new();

    for over in overspent.iter_mut() {
        for under in underspent.iter_mut() {
            let amount = under.remaining.abs().min(over.remaining);
            if amount > 0.0 {
                under.remaining += amount;
                over.remaining -= amount;

                // Float residue can leave sub-cent matches; apply, don't emit
                let rounded = round_cents(amount);
                if rounded > 0.0 {
                    suggestions.push(Suggestion {
                        from: under.category.to_string(),
                        to: over.category.to_string(),
                        amount: rounded,
                    });
                }

                if over.remaining <= 0.0 {
                    break;
                }
            }
        }
    }

    if suggestions.is_empty() {
        Reallocation::NotNeeded
    } else {
        Reallocation::Transfers(suggestions)
    }
}
