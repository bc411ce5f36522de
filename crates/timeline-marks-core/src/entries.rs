use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MalformedEntries;
use crate::error::{EntryPayloadError, Result, TransformError};
use crate::model::{ColumnMetadata, ColumnarData, Group, Segment, Series, TimeRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub name: String,
    #[serde(rename = "timeRange")]
    pub time_range: TimeRange,
}

/// The payload cell of an entries column: present only when the column holds exactly one row.
pub fn entry_payload(cells: Option<&[Value]>) -> Option<&Value> {
    match cells? {
        [payload] => Some(payload),
        _ => None,
    }
}

/// Decodes a payload cell. The cell holds either a JSON string encoding the array or the
/// array itself; null decodes to no entries.
pub fn decode_entries(
    payload: &Value,
) -> std::result::Result<Vec<EntryRecord>, EntryPayloadError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::String(text) => Ok(serde_json::from_str(text)?),
        Value::Array(_) => Ok(Vec::<EntryRecord>::deserialize(payload)?),
        Value::Bool(_) => Err(EntryPayloadError::UnsupportedCell { kind: "boolean" }),
        Value::Number(_) => Err(EntryPayloadError::UnsupportedCell { kind: "number" }),
        Value::Object(_) => Err(EntryPayloadError::UnsupportedCell { kind: "object" }),
    }
}

/// Groups records by name in first-seen order; each series keeps its records in input order.
pub fn group_entries(records: Vec<EntryRecord>) -> Vec<Series> {
    let mut by_name: IndexMap<String, Series> = IndexMap::new();

    for record in records {
        by_name
            .entry(record.name.clone())
            .or_insert_with(|| Series {
                label: record.name,
                data: Vec::new(),
            })
            .data
            .push(Segment::new(record.time_range));
    }

    by_name.into_values().collect()
}

pub fn entry_group(
    column_id: &str,
    data: &ColumnarData,
    metadata: &ColumnMetadata,
    policy: MalformedEntries,
) -> Result<Group> {
    let group = match metadata.name(column_id) {
        Some(name) => name.to_string(),
        None => {
            debug!(column = column_id, "entries column has no metadata; labelling by id");
            column_id.to_string()
        }
    };

    let records = match entry_payload(data.column(column_id)) {
        Some(payload) => match decode_entries(payload) {
            Ok(records) => records,
            Err(source) => match policy {
                MalformedEntries::Skip => {
                    warn!(column = column_id, error = %source, "ignoring malformed entries payload");
                    Vec::new()
                }
                MalformedEntries::Error => {
                    return Err(TransformError::MalformedEntries {
                        column: column_id.to_string(),
                        source,
                    })
                }
            },
        },
        None => Vec::new(),
    };

    Ok(Group {
        group,
        data: group_entries(records),
    })
}
