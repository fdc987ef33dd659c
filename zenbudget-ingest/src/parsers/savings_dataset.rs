//! Savings-Optimized dataset parser (CSV)
//!
//! Expected header (other columns are ignored, order does not matter):
//!   ...,AmountAED,...,TxnDate,...,FlowType,...,SpendType,...
//!
//! Rows with an unusable amount, date, flow type or category are skipped
//! and counted; a missing column or unreadable file fails the whole load.

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use zenbudget_core::{FlowType, TransactionRecord};

use crate::coerce::Coercer;
use crate::types::{DatasetColumns, DropReason, LoadedDataset, RowStats};

struct ColumnIndex {
    amount: usize,
    date: usize,
    flow_type: usize,
    spend_type: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &DatasetColumns) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            match headers.iter().position(|h| h.trim() == name) {
                Some(i) => Ok(i),
                None => bail!(
                    "missing column '{name}' (found: {})",
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            }
        };

        Ok(Self {
            amount: find(&columns.amount)?,
            date: find(&columns.date)?,
            flow_type: find(&columns.flow_type)?,
            spend_type: find(&columns.spend_type)?,
        })
    }
}

/// Load the dataset from a CSV file.
pub fn load_transactions(path: impl AsRef<Path>, columns: &DatasetColumns) -> Result<LoadedDataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let dataset =
        read_transactions(file, columns).with_context(|| format!("reading {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = dataset.stats.rows,
        kept = dataset.stats.kept,
        dropped = dataset.stats.dropped(),
        "loaded transactions"
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. The first row must be the header.
pub fn read_transactions<R: Read>(reader: R, columns: &DatasetColumns) -> Result<LoadedDataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().context("reading header row")?.clone();
    let idx = ColumnIndex::resolve(&headers, columns)?;
    let coercer = Coercer::new()?;

    let mut records = Vec::new();
    let mut stats = RowStats::default();

    for (line, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("reading data row {}", line + 1))?;
        stats.rows += 1;

        match parse_row(&row, &idx, &coercer) {
            Ok(record) => {
                stats.kept += 1;
                records.push(record);
            }
            Err(reason) => {
                debug!(row = line + 1, ?reason, "skipping row");
                stats.record_drop(reason);
            }
        }
    }

    Ok(LoadedDataset { records, stats })
}

fn parse_row(
    row: &StringRecord,
    idx: &ColumnIndex,
    coercer: &Coercer,
) -> std::result::Result<TransactionRecord, DropReason> {
    let cell = |i: usize| row.get(i).unwrap_or("");

    let amount = coercer.amount(cell(idx.amount)).ok_or(DropReason::Amount)?;
    let date = coercer.timestamp(cell(idx.date)).ok_or(DropReason::Date)?;
    let flow_type = FlowType::parse(cell(idx.flow_type)).ok_or(DropReason::FlowType)?;

    let spend_type = cell(idx.spend_type).trim();
    if spend_type.is_empty() {
        return Err(DropReason::Category);
    }

    Ok(TransactionRecord::new(amount, date, flow_type, spend_type))
}
