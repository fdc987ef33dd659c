use chrono::NaiveDate;
use std::collections::HashMap;
use zenbudget_core::{
    CategoryTotals, FlowType, Reallocation, TransactionRecord, WeekRule, aggregate, reallocate,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A few weeks of history plus a current week (Mon 2026-02-16 .. Sun 2026-02-22)
fn history() -> Vec<TransactionRecord> {
    let mut records = Vec::new();
    for (week_start, groceries, coffee, transport, fun) in [
        (d(2026, 1, 26), 180.0, 25.0, 140.0, 90.0),
        (d(2026, 2, 2), 210.0, 35.0, 160.0, 110.0),
        (d(2026, 2, 9), 210.0, 30.0, 150.0, 100.0),
    ] {
        records.push(TransactionRecord::debit(groceries, week_start, "groceries"));
        records.push(TransactionRecord::debit(coffee, week_start, "coffee"));
        records.push(TransactionRecord::debit(transport, week_start, "transport"));
        records.push(TransactionRecord::debit(fun, week_start, "entertainment"));
    }

    // Current week
    records.push(TransactionRecord::debit(180.0, d(2026, 2, 16), "groceries"));
    records.push(TransactionRecord::debit(120.0, d(2026, 2, 19), "groceries"));
    records.push(TransactionRecord::debit(10.0, d(2026, 2, 17), "coffee"));
    records.push(TransactionRecord::debit(100.0, d(2026, 2, 18), "transport"));
    records.push(TransactionRecord::debit(135.0, d(2026, 2, 21), "entertainment"));

    // Noise the aggregator must ignore
    let salary_day = d(2026, 2, 17).and_hms_opt(8, 0, 0).unwrap();
    records.push(TransactionRecord::new(9000.0, salary_day, FlowType::Credit, "salary"));
    records
}

fn today() -> NaiveDate {
    d(2026, 2, 18)
}

#[test]
fn test_end_to_end_suggestions() {
    let totals = aggregate(&history(), WeekRule::default(), today());
    // groceries 300 vs 200 (+100), entertainment 135 vs 100 (+35)
    // transport 100 vs 150 (-50), coffee 10 vs 30 (-20)
    let result = reallocate(&totals);
    let got: Vec<_> = result
        .suggestions()
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str(), s.amount))
        .collect();
    assert_eq!(
        got,
        vec![
            ("transport", "groceries", 50.0),
            ("coffee", "groceries", 20.0),
        ]
    );
}

#[test]
fn test_idempotent_for_same_today() {
    let records = history();
    let first = reallocate(&aggregate(&records, WeekRule::default(), today()));
    let second = reallocate(&aggregate(&records, WeekRule::default(), today()));
    assert_eq!(first, second);
}

#[test]
fn test_conservation_and_no_self_transfer() {
    let totals = CategoryTotals::from_entries([
        ("a", 500.0, 100.0),
        ("b", 260.0, 200.0),
        ("c", 75.0, 50.0),
        ("d", 0.0, 120.0),
        ("e", 10.0, 90.0),
        ("f", 40.0, 45.0),
    ]);
    let start: HashMap<String, f64> = totals
        .aggregates()
        .map(|a| (a.category, a.difference))
        .collect();

    let result = reallocate(&totals);
    assert!(result.is_needed());

    let mut received: HashMap<&str, f64> = HashMap::new();
    let mut given: HashMap<&str, f64> = HashMap::new();
    for s in result.suggestions() {
        assert_ne!(s.from, s.to);
        assert!(s.amount > 0.0);
        assert!(start[&s.from] < 0.0, "{} was not underspent", s.from);
        assert!(start[&s.to] > 0.0, "{} was not overspent", s.to);
        *received.entry(&s.to).or_insert(0.0) += s.amount;
        *given.entry(&s.from).or_insert(0.0) += s.amount;
    }

    for (category, total) in received {
        assert!(total <= start[category] + 1e-9);
    }
    for (category, total) in given {
        assert!(total <= start[category].abs() + 1e-9);
    }
}

#[test]
fn test_overspent_processed_in_descending_order() {
    let totals = CategoryTotals::from_entries([
        ("alpha", 110.0, 100.0),
        ("beta", 150.0, 100.0),
        ("gamma", 130.0, 100.0),
        ("sink", 0.0, 1000.0),
    ]);
    let result = reallocate(&totals);
    let targets: Vec<_> = result.suggestions().iter().map(|s| s.to.as_str()).collect();
    assert_eq!(targets, vec!["beta", "gamma", "alpha"]);
}

#[test]
fn test_ties_keep_category_order() {
    let totals = CategoryTotals::from_entries([
        ("zeta", 20.0, 0.0),
        ("eta", 20.0, 0.0),
        ("pool-b", 0.0, 30.0),
        ("pool-a", 0.0, 30.0),
    ]);
    let result = reallocate(&totals);
    let got: Vec<_> = result
        .suggestions()
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str(), s.amount))
        .collect();
    assert_eq!(
        got,
        vec![
            ("pool-a", "eta", 20.0),
            ("pool-a", "zeta", 10.0),
            ("pool-b", "zeta", 10.0),
        ]
    );
}

#[test]
fn test_empty_and_credit_only_inputs_yield_sentinel() {
    assert_eq!(
        reallocate(&aggregate(&[], WeekRule::default(), today())),
        Reallocation::NotNeeded
    );

    let credit_only: Vec<_> = history()
        .into_iter()
        .filter(|r| !r.is_debit())
        .collect();
    let result = reallocate(&aggregate(&credit_only, WeekRule::default(), today()));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!([{ "message": "No reallocation needed" }])
    );
}
