//! Writes query results to `<path>.csv` and `<path>.query`.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{csv_path, query_path, require_path};
use crate::error::{QueryRunnerError, Result};
use crate::result::QueryResult;

/// Saves a query result as CSV, plus the query text when given.
///
/// Every row must have exactly one value per header; a mismatch is reported
/// before any file is touched. The `.query` file is only written when `query`
/// is non-empty.
pub fn save_query_results(
    result: &QueryResult,
    path: impl AsRef<Path>,
    query: Option<&str>,
) -> Result<()> {
    let path = path.as_ref();
    require_path(path)?;
    check_row_widths(result)?;

    let csv_file = csv_path(path);
    write_csv(result, &csv_file)?;
    info!(
        "Saved {} rows to {}",
        result.row_count(),
        csv_file.display()
    );

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let query_file = query_path(path);
        fs::write(&query_file, query).map_err(|e| {
            QueryRunnerError::persistence(format!("{}: {e}", query_file.display()))
        })?;
        debug!("Saved query text to {}", query_file.display());
    }

    Ok(())
}

/// Saves a raw JSON query result, as returned by the API.
///
/// The value must carry `headers` and a row set under `result` or `rows`;
/// anything else is an invalid argument.
pub fn save_query_results_json(
    value: serde_json::Value,
    path: impl AsRef<Path>,
    query: Option<&str>,
) -> Result<()> {
    require_path(path.as_ref())?;
    let result = QueryResult::from_json(value)?;
    save_query_results(&result, path, query)
}

fn check_row_widths(result: &QueryResult) -> Result<()> {
    let expected = result.headers.len();
    for (i, row) in result.rows.iter().enumerate() {
        if row.len() != expected {
            return Err(QueryRunnerError::persistence(format!(
                "row {i} has {} values, expected {expected}",
                row.len()
            )));
        }
    }
    Ok(())
}

fn write_csv(result: &QueryResult, file: &Path) -> Result<()> {
    let to_err = |e: csv::Error| QueryRunnerError::persistence(format!("{}: {e}", file.display()));

    let mut writer = csv::Writer::from_path(file).map_err(to_err)?;

    // An empty record would be written as `""`, which reads back as one column
    if !result.headers.is_empty() {
        writer.write_record(&result.headers).map_err(to_err)?;
        for row in &result.rows {
            writer
                .write_record(row.iter().map(|v| v.to_field()))
                .map_err(to_err)?;
        }
    }

    writer
        .flush()
        .map_err(|e| QueryRunnerError::persistence(format!("{}: {e}", file.display())))
}
