use serde_json::{json, Value};

use crate::config::{TimelineConfig, PERCENTILE_CHOICES};
use crate::model::{ColumnMetadata, ColumnarData, Domain, Segment, Series};
use crate::transform;

fn config(marks: &[&str], entries: &[&str], percentile: f64) -> TimelineConfig {
    TimelineConfig {
        marks: marks.iter().map(|id| id.to_string()).collect(),
        entries: entries.iter().map(|id| id.to_string()).collect(),
        percentile,
        ..TimelineConfig::default()
    }
}

fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().map(|value| json!(value)).collect()
}

#[test]
fn empty_marks_short_circuit() {
    let data = ColumnarData::new()
        .with_column("s", numbers(&[10.0]))
        .with_column("e", vec![json!("[]")]);
    let metadata = ColumnMetadata::new()
        .with_column("s", "XStartTime")
        .with_column("e", "Trace");

    let result = transform(&config(&[], &["e"], 0.5), &data, &metadata).expect("transform");
    assert!(result.groups.is_empty());
    assert_eq!(result.domain, Domain(0.0, 1.0));

    let from_json = TimelineConfig::from_json_str(r#"{"entries": ["e"]}"#).unwrap();
    let result = transform(&from_json, &data, &metadata).expect("transform");
    assert_eq!(result.into_parts(), (Vec::new(), Domain(0.0, 1.0)));
}

#[test]
fn percentile_is_monotonic_over_dropdown_choices() {
    let data = ColumnarData::new().with_column(
        "s",
        vec![json!(7), json!(null), json!(3), json!(42), json!(15), json!(8)],
    );
    let metadata = ColumnMetadata::new().with_column("s", "RunEndTime");

    let mut previous = f64::NEG_INFINITY;
    for percentile in PERCENTILE_CHOICES {
        let result = transform(&config(&["s"], &[], percentile), &data, &metadata).unwrap();
        let end = result.domain.max();
        assert!(end >= previous, "p{percentile} gave {end} < {previous}");
        previous = end;
    }
}

#[test]
fn start_and_end_columns_pair_into_one_span() {
    let data = ColumnarData::new()
        .with_column("c1", numbers(&[10.0]))
        .with_column("c2", numbers(&[50.0]));
    let metadata = ColumnMetadata::new()
        .with_column("c1", "X StartTime")
        .with_column("c2", "X EndTime");

    let result = transform(&config(&["c1", "c2"], &[], 0.5), &data, &metadata).unwrap();
    let marks = result.marks().expect("marks group");

    assert_eq!(marks.group, "marks");
    assert_eq!(
        marks.data,
        vec![Series {
            label: "X".to_string(),
            data: vec![Segment {
                time_range: [10.0, 50.0],
                val: 40.0,
            }],
        }]
    );
    assert_eq!(result.domain, Domain(10.0, 50.0));
}

#[test]
fn orphan_start_keeps_zero_end() {
    let data = ColumnarData::new().with_column("c1", numbers(&[12.0]));
    let metadata = ColumnMetadata::new().with_column("c1", "Y StartTime");

    let result = transform(&config(&["c1"], &[], 0.5), &data, &metadata).unwrap();
    let span = result.marks().unwrap().find_series("Y").expect("Y span");
    assert_eq!(
        span.data,
        vec![Segment {
            time_range: [12.0, 0.0],
            val: -12.0,
        }]
    );
    assert_eq!(result.domain, Domain(12.0, 0.0));
}

#[test]
fn entries_group_by_name_under_display_name() {
    let payload = r#"[{"name":"A","timeRange":[0,5]},{"name":"A","timeRange":[5,9]},{"name":"B","timeRange":[1,2]}]"#;
    let data = ColumnarData::new()
        .with_column("m", numbers(&[1.0]))
        .with_column("e", vec![json!(payload)]);
    let metadata = ColumnMetadata::new()
        .with_column("m", "Rows")
        .with_column("e", "Query phases");

    let result = transform(&config(&["m"], &["e"], 0.5), &data, &metadata).unwrap();
    assert_eq!(result.groups.len(), 2);
    assert!(result.groups[0].data.is_empty());

    let entries = &result.groups[1];
    assert_eq!(entries.group, "Query phases");
    assert_eq!(entries.data.len(), 2);

    let a = entries.find_series("A").unwrap();
    let a_durations: Vec<f64> = a.data.iter().map(|segment| segment.val).collect();
    assert_eq!(a_durations, vec![5.0, 4.0]);
    assert_eq!(a.data[1].time_range, [5.0, 9.0]);

    let b = entries.find_series("B").unwrap();
    assert_eq!(b.data.len(), 1);
    assert_eq!(b.data[0].val, 1.0);
}

#[test]
fn null_cells_aggregate_as_zero() {
    let metadata = ColumnMetadata::new().with_column("c", "ZEndTime");
    let with_nulls =
        ColumnarData::new().with_column("c", vec![json!(null), json!(10), json!(null), json!(20)]);
    let with_zeros = ColumnarData::new().with_column("c", numbers(&[0.0, 10.0, 0.0, 20.0]));

    let cfg = config(&["c"], &[], 0.5);
    let a = transform(&cfg, &with_nulls, &metadata).unwrap();
    let b = transform(&cfg, &with_zeros, &metadata).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.domain.max(), 5.0);
}

#[test]
fn marks_without_data_do_not_change_output() {
    let data = ColumnarData::new()
        .with_column("s", numbers(&[4.0, 6.0]))
        .with_column("e", numbers(&[9.0, 11.0]));
    let metadata = ColumnMetadata::new()
        .with_column("s", "LoadStartTime")
        .with_column("e", "LoadEndTime")
        .with_column("ghost", "GhostStartTime");

    let base = transform(&config(&["s", "e"], &[], 0.5), &data, &metadata).unwrap();
    let extended = transform(&config(&["s", "ghost", "e", "nowhere"], &[], 0.5), &data, &metadata)
        .unwrap();

    assert_eq!(
        serde_json::to_vec(&base).unwrap(),
        serde_json::to_vec(&extended).unwrap()
    );
}

#[test]
fn entries_groups_follow_configuration_order() {
    let data = ColumnarData::new()
        .with_column("m", numbers(&[1.0]))
        .with_column("e1", vec![json!("[]"), json!("[]")])
        .with_column("e2", vec![json!(r#"[{"name":"only","timeRange":[2,3]}]"#)]);
    let metadata = ColumnMetadata::new()
        .with_column("e1", "First")
        .with_column("e2", "Second");

    let result = transform(&config(&["m"], &["e2", "e1"], 0.5), &data, &metadata).unwrap();
    let labels: Vec<&str> = result.groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(labels, vec!["marks", "Second", "First"]);
    assert!(result.groups[2].data.is_empty(), "two rows means no entries");
}

#[test]
fn output_serializes_with_renderer_field_names() {
    let data = ColumnarData::new()
        .with_column("s", numbers(&[1.0]))
        .with_column("e", numbers(&[3.0]));
    let metadata = ColumnMetadata::new()
        .with_column("s", "AStartTime")
        .with_column("e", "AEndTime");

    let result = transform(&config(&["s", "e"], &[], 0.5), &data, &metadata).unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "groups": [{
                "group": "marks",
                "data": [{
                    "label": "A",
                    "data": [{"timeRange": [1.0, 3.0], "val": 2.0}]
                }]
            }],
            "domain": [1.0, 3.0]
        })
    );
    assert_eq!(result.share_of_domain(2.0), Some(2.0 / 3.0));

    let no_spans = transform(
        &config(&["s"], &[], 0.5),
        &data,
        &ColumnMetadata::new().with_column("s", "Rows"),
    )
    .unwrap();
    assert_eq!(no_spans.domain, Domain::NO_SPANS);
    assert_eq!(no_spans.share_of_domain(2.0), None);
}
