use indexmap::IndexMap;
use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::model::ColumnarData;

/// Percentile per mark column, keyed by column id in `marks` order. Columns without data
/// (or without rows) are absent rather than zero.
pub type Aggregates = IndexMap<String, f64>;

pub fn aggregate_marks(
    marks: &[String],
    data: &ColumnarData,
    percentile: f64,
) -> Result<Aggregates> {
    let mut aggregates = Aggregates::with_capacity(marks.len());

    for column_id in marks {
        let Some(cells) = data.column(column_id) else {
            debug!(column = column_id.as_str(), "mark column has no data; skipping");
            continue;
        };

        let values = coerce_column(column_id, cells)?;
        match column_percentile(column_id, &values, percentile)? {
            Some(value) => {
                aggregates.insert(column_id.clone(), value);
            }
            None => debug!(column = column_id.as_str(), "mark column has no rows; skipping"),
        }
    }

    Ok(aggregates)
}

pub fn coerce_column(column_id: &str, cells: &[Value]) -> Result<Vec<f64>> {
    cells
        .iter()
        .enumerate()
        .map(|(row, cell)| coerce_cell(column_id, row, cell))
        .collect()
}

/// Null, `false` and the empty string count as zero. Numbers and numeric strings pass
/// through; everything else is rejected.
pub fn coerce_cell(column_id: &str, row: usize, cell: &Value) -> Result<f64> {
    let non_numeric = || TransformError::NonNumericValue {
        column: column_id.to_string(),
        row,
        value: cell.to_string(),
    };

    match cell {
        Value::Null | Value::Bool(false) => Ok(0.0),
        Value::Number(number) => number.as_f64().ok_or_else(non_numeric),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(non_numeric)
        }
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => Err(non_numeric()),
    }
}

/// Linear interpolation between order statistics at `(n - 1) * percentile`.
pub fn percentile(values: &[f64], percentile: f64) -> PolarsResult<Option<f64>> {
    let chunked = Float64Chunked::from_slice("values".into(), values);
    chunked.quantile(percentile, QuantileMethod::Linear)
}

fn column_percentile(column_id: &str, values: &[f64], p: f64) -> Result<Option<f64>> {
    percentile(values, p).map_err(|source| TransformError::Aggregation {
        column: column_id.to_string(),
        source,
    })
}
