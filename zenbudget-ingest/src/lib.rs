//! zenbudget-ingest: loads the spending dataset into typed transaction records.

pub mod coerce;
pub mod parsers;
pub mod types;

pub use parsers::savings_dataset::{load_transactions, read_transactions};
pub use types::{DatasetColumns, DropReason, LoadedDataset, RowStats};
