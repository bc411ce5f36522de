use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw cell values per column id, in row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnarData {
    columns: HashMap<String, Vec<Value>>,
}

impl ColumnarData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        column_id: impl Into<String>,
        cells: Vec<Value>,
    ) -> Option<Vec<Value>> {
        self.columns.insert(column_id.into(), cells)
    }

    pub fn with_column(mut self, column_id: impl Into<String>, cells: Vec<Value>) -> Self {
        self.insert(column_id, cells);
        self
    }

    pub fn column(&self, column_id: &str) -> Option<&[Value]> {
        self.columns.get(column_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Vec<Value>)> for ColumnarData {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Value>)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
}

/// Display metadata per column id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMetadata {
    columns: HashMap<String, ColumnInfo>,
}

impl ColumnMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column_id: impl Into<String>, name: impl Into<String>) {
        self.columns
            .insert(column_id.into(), ColumnInfo { name: name.into() });
    }

    pub fn with_column(mut self, column_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert(column_id, name);
        self
    }

    pub fn get(&self, column_id: &str) -> Option<&ColumnInfo> {
        self.columns.get(column_id)
    }

    pub fn name(&self, column_id: &str) -> Option<&str> {
        self.get(column_id).map(|info| info.name.as_str())
    }
}

/// A `[start, end]` pair on the shared time axis.
pub type TimeRange = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "timeRange")]
    pub time_range: TimeRange,
    pub val: f64,
}

impl Segment {
    pub fn new(time_range: TimeRange) -> Self {
        Self {
            time_range,
            val: time_range[1] - time_range[0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub group: String,
    pub data: Vec<Series>,
}

impl Group {
    pub fn find_series(&self, label: &str) -> Option<&Series> {
        self.data.iter().find(|series| series.label == label)
    }
}

/// Value range handed to the renderer's intensity scale; serializes as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain(pub f64, pub f64);

impl Domain {
    pub const NO_SPANS: Domain = Domain(0.0, 0.0);
    pub const EMPTY_MARKS: Domain = Domain(0.0, 1.0);

    pub fn min(&self) -> f64 {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    pub groups: Vec<Group>,
    pub domain: Domain,
}

impl TimelineData {
    pub(crate) fn empty() -> Self {
        Self {
            groups: Vec::new(),
            domain: Domain::EMPTY_MARKS,
        }
    }

    pub fn marks(&self) -> Option<&Group> {
        self.groups.first()
    }

    /// Fraction of the domain maximum covered by `val`, as shown beside a segment.
    pub fn share_of_domain(&self, val: f64) -> Option<f64> {
        let max = self.domain.max();
        (max != 0.0).then(|| val / max)
    }

    pub fn into_parts(self) -> (Vec<Group>, Domain) {
        (self.groups, self.domain)
    }
}
