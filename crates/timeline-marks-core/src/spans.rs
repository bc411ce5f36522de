use indexmap::IndexMap;

use crate::aggregate::Aggregates;
use crate::model::{ColumnMetadata, Domain, Group, Segment, Series, TimeRange};

pub const START_SUFFIX: &str = "StartTime";
pub const END_SUFFIX: &str = "EndTime";
pub const MARKS_GROUP: &str = "marks";

/// Role a mark column plays, read off its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanBoundary<'a> {
    Start(&'a str),
    End(&'a str),
    NoMatch,
}

impl<'a> SpanBoundary<'a> {
    /// `"<label>StartTime"` or `"<label>EndTime"`, case-sensitive and anchored at the end of
    /// the name. The label keeps everything before the suffix minus surrounding whitespace,
    /// and may be empty.
    pub fn parse(name: &'a str) -> Self {
        if let Some(label) = name.strip_suffix(START_SUFFIX) {
            SpanBoundary::Start(label.trim())
        } else if let Some(label) = name.strip_suffix(END_SUFFIX) {
            SpanBoundary::End(label.trim())
        } else {
            SpanBoundary::NoMatch
        }
    }

    pub fn label(&self) -> Option<&'a str> {
        match *self {
            SpanBoundary::Start(label) | SpanBoundary::End(label) => Some(label),
            SpanBoundary::NoMatch => None,
        }
    }
}

/// Time spans keyed by label in first-discovery order.
pub type TimeSpans = IndexMap<String, TimeRange>;

pub fn pair_spans(
    marks: &[String],
    metadata: &ColumnMetadata,
    aggregates: &Aggregates,
) -> (TimeSpans, Domain) {
    let mut spans = TimeSpans::new();
    let mut earliest_start: Option<f64> = None;
    let mut latest_end: Option<f64> = None;

    for column_id in marks {
        let Some(name) = metadata.name(column_id) else {
            continue;
        };
        let Some(&value) = aggregates.get(column_id) else {
            continue;
        };

        match SpanBoundary::parse(name) {
            SpanBoundary::Start(label) => {
                spans.entry(label.to_string()).or_insert([0.0, 0.0])[0] = value;
                earliest_start = Some(earliest_start.map_or(value, |start| start.min(value)));
            }
            SpanBoundary::End(label) => {
                spans.entry(label.to_string()).or_insert([0.0, 0.0])[1] = value;
                latest_end = Some(latest_end.map_or(value, |end| end.max(value)));
            }
            SpanBoundary::NoMatch => {}
        }
    }

    // a side no column contributed to stays at zero
    let domain = Domain(earliest_start.unwrap_or(0.0), latest_end.unwrap_or(0.0));
    (spans, domain)
}

/// One single-point series per span; each point summarises the whole column population.
pub fn marks_group(spans: TimeSpans) -> Group {
    let data = spans
        .into_iter()
        .map(|(label, time_range)| Series {
            label,
            data: vec![Segment::new(time_range)],
        })
        .collect();

    Group {
        group: MARKS_GROUP.to_string(),
        data,
    }
}
