use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{Kind, Period, TIMESTAMP_FORMAT};
use crate::store::TransactionStore;

const HEADER: [&str; 8] = [
    "id",
    "kind",
    "amount",
    "description",
    "category",
    "month",
    "year",
    "created_at",
];

/// Write every transaction of `period` to a CSV file at `path`, kinds in
/// declaration order and newest first within a kind. Returns the row count.
pub(crate) fn export_period<S: TransactionStore + ?Sized>(
    store: &S,
    period: Period,
    path: &Path,
) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(HEADER)?;

    let mut count = 0;
    for &kind in Kind::all() {
        for txn in store.query(kind, period)? {
            wtr.write_record([
                txn.id.to_string(),
                txn.kind.as_str().to_string(),
                txn.amount.to_string(),
                txn.description,
                txn.category,
                txn.period.month().to_string(),
                txn.period.year().to_string(),
                txn.created_at.format(TIMESTAMP_FORMAT).to_string(),
            ])?;
            count += 1;
        }
    }
    wtr.flush()?;

    tracing::info!(%period, count, path = %path.display(), "exported transactions");
    Ok(count)
}
