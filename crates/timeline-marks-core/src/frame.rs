use polars::prelude::*;
use serde_json::{Number, Value};

use crate::error::Result;
use crate::model::{ColumnMetadata, ColumnarData};

impl ColumnarData {
    /// One entry per frame column, keyed by column name. String and boolean columns keep
    /// their JSON type; every other dtype is cast to `Float64`. Nulls stay null.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        df.get_columns()
            .iter()
            .map(|column| -> Result<(String, Vec<Value>)> {
                Ok((column.name().to_string(), column_cells(column)?))
            })
            .collect()
    }
}

impl ColumnMetadata {
    /// Column names double as ids when data comes straight from a frame.
    pub fn from_dataframe(df: &DataFrame) -> Self {
        df.get_column_names()
            .into_iter()
            .fold(ColumnMetadata::new(), |metadata, name| {
                metadata.with_column(name.as_str(), name.as_str())
            })
    }
}

fn column_cells(column: &Column) -> PolarsResult<Vec<Value>> {
    let series = column.as_materialized_series();

    let cells = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|cell| cell.map_or(Value::Null, |text| Value::String(text.to_string())))
            .collect(),
        DataType::Boolean => series
            .bool()?
            .into_iter()
            .map(|cell| cell.map_or(Value::Null, Value::Bool))
            .collect(),
        _ => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|cell| {
                cell.and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            })
            .collect(),
    };

    Ok(cells)
}
