// crates/timeline-marks/src/report.rs

use comfy_table::Table;
use timeline_marks_core::{Group, TimelineData};

/// Renders every group as a table; the marks table also shows each span's share of the domain.
pub fn render(output: &TimelineData) -> String {
    let mut rendered = format!(
        "domain: [{}, {}]\n",
        output.domain.min(),
        output.domain.max()
    );

    for group in &output.groups {
        rendered.push_str(&format!("\n{}\n{}\n", group.group, group_table(output, group)));
    }

    rendered
}

fn group_table(output: &TimelineData, group: &Group) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["label", "start", "end", "duration", "share"]);

    for series in &group.data {
        for segment in &series.data {
            let share = output
                .share_of_domain(segment.val)
                .map(|share| format!("{:.2}%", share * 100.0))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                series.label.clone(),
                segment.time_range[0].to_string(),
                segment.time_range[1].to_string(),
                segment.val.to_string(),
                share,
            ]);
        }
    }

    table
}
