//! Flat-file layer: the three CSV files the generator emits and the
//! loader consumes.

use crate::{
    error::{PipelineError, PipelineResult},
    model::{round1, round2, DatasetSummary, LineItem, PaymentMethod, Transaction},
};
use std::fs;
use std::path::{Path, PathBuf};

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const ITEMS_FILE: &str = "transaction_items.csv";
pub const SUMMARY_FILE: &str = "summary.csv";

/// Dataset-level totals derived from the transaction records.
/// Cash percentage is 0 when there is no revenue at all.
pub fn summarize(transactions: &[Transaction]) -> DatasetSummary {
    let total_revenue: f64 = transactions.iter().map(|t| t.gross_income).sum();
    let cash_revenue: f64 = transactions
        .iter()
        .filter(|t| t.payment_method == PaymentMethod::Cash)
        .map(|t| t.gross_income)
        .sum();
    let cash_percentage = if total_revenue > 0.0 {
        round1(cash_revenue / total_revenue * 100.0)
    } else {
        0.0
    };
    DatasetSummary {
        total_transactions: transactions.len() as u64,
        total_revenue: round2(total_revenue),
        cash_revenue: round2(cash_revenue),
        cash_percentage,
    }
}

/// Write all three files into `data_dir` (created if absent),
/// overwriting any previous run's output. Returns the summary row.
pub fn write_dataset(
    data_dir: &Path,
    transactions: &[Transaction],
    items: &[LineItem],
) -> PipelineResult<DatasetSummary> {
    fs::create_dir_all(data_dir)?;

    let mut writer = csv::Writer::from_path(data_dir.join(TRANSACTIONS_FILE))?;
    for t in transactions {
        writer.serialize(t)?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(data_dir.join(ITEMS_FILE))?;
    for item in items {
        writer.serialize(item)?;
    }
    writer.flush()?;

    let summary = summarize(transactions);
    let mut writer = csv::Writer::from_path(data_dir.join(SUMMARY_FILE))?;
    writer.serialize(&summary)?;
    writer.flush()?;

    log::info!(
        "wrote {} transactions and {} items under {}",
        transactions.len(),
        items.len(),
        data_dir.display()
    );

    Ok(summary)
}

fn require_file(path: PathBuf) -> PipelineResult<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(PipelineError::MissingInput { path })
    }
}

pub fn read_transactions(data_dir: &Path) -> PipelineResult<Vec<Transaction>> {
    let path = require_file(data_dir.join(TRANSACTIONS_FILE))?;
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn read_items(data_dir: &Path) -> PipelineResult<Vec<LineItem>> {
    let path = require_file(data_dir.join(ITEMS_FILE))?;
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn read_summary(data_dir: &Path) -> PipelineResult<DatasetSummary> {
    let path = require_file(data_dir.join(SUMMARY_FILE))?;
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = reader.deserialize::<DatasetSummary>();
    match rows.next() {
        Some(row) => Ok(row?),
        None => Ok(DatasetSummary {
            total_transactions: 0,
            total_revenue: 0.0,
            cash_revenue: 0.0,
            cash_percentage: 0.0,
        }),
    }
}
