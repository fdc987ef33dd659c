//! Plain-text and JSON rendering of reallocation results.

use anyhow::Result;
use serde_json::json;
use std::collections::BTreeMap;
use zenbudget_core::{CategoryTotals, NO_REALLOCATION_MESSAGE, Reallocation};

pub fn render_suggestions_text(result: &Reallocation) -> String {
    match result {
        Reallocation::NotNeeded => format!("{NO_REALLOCATION_MESSAGE}\n"),
        Reallocation::Transfers(suggestions) => {
            let mut out = String::new();
            for s in suggestions {
                out.push_str(&format!("Move {:.2} from {} to {}\n", s.amount, s.from, s.to));
            }
            out
        }
    }
}

pub fn render_suggestions_json(result: &Reallocation) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Payload printed in place of suggestions when `--json` is set and the run failed
pub fn render_error_json(err: &anyhow::Error) -> String {
    json!({ "error": format!("{err:#}") }).to_string()
}

/// Per-category table. Budget column shows "-" when no reference budget is set.
pub fn render_summary(totals: &CategoryTotals, budgets: &BTreeMap<String, f64>) -> String {
    if totals.is_empty() {
        return "No debit transactions found\n".to_string();
    }

    let width = totals
        .aggregates()
        .map(|a| a.category.len())
        .max()
        .unwrap_or(0)
        .max("category".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:<width$}  {:>10}  {:>10}  {:>10}  {:>10}\n",
        "category", "current", "average", "difference", "budget"
    ));
    for a in totals.aggregates() {
        let budget = budgets
            .get(&a.category)
            .map(|b| format!("{b:.2}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<width$}  {:>10.2}  {:>10.2}  {:>+10.2}  {:>10}\n",
            a.category, a.current, a.average, a.difference, budget
        ));
    }
    out
}
