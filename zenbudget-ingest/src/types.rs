use serde::{Deserialize, Serialize};
use zenbudget_core::TransactionRecord;

/// Header names of the four columns the loader needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetColumns {
    pub amount: String,
    pub date: String,
    pub flow_type: String,
    pub spend_type: String,
}

impl Default for DatasetColumns {
    fn default() -> Self {
        Self {
            amount: "AmountAED".to_string(),
            date: "TxnDate".to_string(),
            flow_type: "FlowType".to_string(),
            spend_type: "SpendType".to_string(),
        }
    }
}

/// Why a row was left out of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Amount,
    Date,
    FlowType,
    Category,
}

/// Row accounting for one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStats {
    pub rows: usize,
    pub kept: usize,
    pub bad_amount: usize,
    pub bad_date: usize,
    pub missing_flow_type: usize,
    pub missing_category: usize,
}

impl RowStats {
    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::Amount => self.bad_amount += 1,
            DropReason::Date => self.bad_date += 1,
            DropReason::FlowType => self.missing_flow_type += 1,
            DropReason::Category => self.missing_category += 1,
        }
    }

    pub fn dropped(&self) -> usize {
        self.rows - self.kept
    }
}

/// Parsed records plus row accounting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDataset {
    pub records: Vec<TransactionRecord>,
    pub stats: RowStats,
}
