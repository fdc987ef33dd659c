//! Transaction record types consumed by the aggregator

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single parsed transaction from the spending dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Transaction amount (dataset currency, AED by default)
    pub amount: f64,
    /// When the transaction happened; date-only values are midnight
    pub date: NaiveDateTime,
    /// Direction of money movement
    pub flow_type: FlowType,
    /// Category label (groceries, transport, ...)
    pub spend_type: String,
}

/// Direction of a transaction, matched case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FlowType {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
    #[serde(untagged)]
    Other(String),
}

impl FlowType {
    /// Parse a raw flow-type cell. Returns `None` for a blank cell.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        Some(match s.to_lowercase().as_str() {
            "debit" => FlowType::Debit,
            "credit" => FlowType::Credit,
            other => FlowType::Other(other.to_string()),
        })
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, FlowType::Debit)
    }
}

impl TransactionRecord {
    /// Create a new TransactionRecord
    pub fn new(
        amount: f64,
        date: NaiveDateTime,
        flow_type: FlowType,
        spend_type: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            date,
            flow_type,
            spend_type: spend_type.into(),
        }
    }

    /// Shorthand for a debit dated at midnight
    pub fn debit(amount: f64, date: NaiveDate, spend_type: impl Into<String>) -> Self {
        Self::new(amount, date.and_time(chrono::NaiveTime::MIN), FlowType::Debit, spend_type)
    }

    /// Calendar day of the transaction
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn is_debit(&self) -> bool {
        self.flow_type.is_debit()
    }
}
