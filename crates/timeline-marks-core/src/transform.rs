use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_marks;
use crate::config::TimelineConfig;
use crate::entries::entry_group;
use crate::error::Result;
use crate::model::{ColumnMetadata, ColumnarData, TimelineData};
use crate::spans::{marks_group, pair_spans};

/// Builds the renderer input from one snapshot of configuration, data and metadata.
///
/// The result always starts with the `"marks"` group, followed by one group per entries
/// column in configuration order. Configured ids missing from `data` or `metadata` are
/// skipped. Without any marks columns the result is empty with domain `[0, 1]`.
///
/// Pure and deterministic: callers recompute whenever any input changes and decide
/// themselves whether to memoize or debounce.
pub fn transform(
    config: &TimelineConfig,
    data: &ColumnarData,
    metadata: &ColumnMetadata,
) -> Result<TimelineData> {
    if config.marks.is_empty() {
        return Ok(TimelineData::empty());
    }

    let aggregates = aggregate_marks(&config.marks, data, config.percentile)?;
    let (spans, domain) = pair_spans(&config.marks, metadata, &aggregates);

    let mut groups = Vec::with_capacity(1 + config.entries.len());
    groups.push(marks_group(spans));
    for column_id in &config.entries {
        groups.push(entry_group(
            column_id,
            data,
            metadata,
            config.malformed_entries,
        )?);
    }

    Ok(TimelineData { groups, domain })
}

/// One snapshot of the input contract as a host hands it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineInput {
    #[serde(default)]
    pub config: TimelineConfig,
    #[serde(default)]
    pub data: ColumnarData,
    #[serde(default)]
    pub columns: ColumnMetadata,
}

impl TimelineInput {
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn transform(&self) -> Result<TimelineData> {
        transform(&self.config, &self.data, &self.columns)
    }
}
