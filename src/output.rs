//! Rendering of reports and raw rows.
//!
//! Supports plain text for the terminal and one JSON object per line.

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;

use crate::filter::FilterSelection;
use crate::loader::Row;
use crate::report::Report;

pub const DIVIDER: &str = "--------------------------------------------------------------------------------";

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct Section<'a, T> {
    section: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

/// JSON view of a raw row, trip columns plus derived fields.
#[derive(Serialize)]
struct RowView<'a> {
    index: usize,
    #[serde(flatten)]
    trip: &'a crate::loader::Trip,
    month: u32,
    day_of_week: &'a str,
}

fn json_line<T: Serialize>(section: &str, body: &T) -> Result<String> {
    Ok(serde_json::to_string(&Section { section, body })?)
}

/// Renders the filter selection heading of a report cycle.
pub fn render_parameters(selection: &FilterSelection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "\n{DIVIDER}\nAnalysis Parameters: \n{}\n\n{DIVIDER}",
            selection.summary()
        )),
        OutputFormat::Json => json_line("parameters", selection),
    }
}

/// Renders a statistics section with its heading.
pub fn render_report<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("\n{}...\n\n{}", R::TITLE, report)),
        OutputFormat::Json => json_line(R::TITLE, report),
    }
}

/// Renders a page of raw rows. An empty page renders a short notice.
pub fn render_rows(rows: &[Row], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(rows_as_text(rows)),
        OutputFormat::Json => {
            let lines = rows
                .iter()
                .map(|row| {
                    serde_json::to_string(&RowView {
                        index: row.index(),
                        trip: row.trip(),
                        month: row.month(),
                        day_of_week: row.day_name(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
    }
}

fn rows_as_text(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "No more rows to display.".to_string();
    }

    let mut out = String::from(
        "Index | Start Time | End Time | Trip Duration | Start Station | End Station | \
         User Type | Gender | Birth Year | Month | Day of Week",
    );
    for row in rows {
        let trip = row.trip();
        out.push_str(&format!(
            "\n{} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {}",
            row.index(),
            timestamp(&trip.start_time),
            timestamp(&trip.end_time),
            trip.duration,
            trip.start_station,
            trip.end_station,
            trip.user_type,
            trip.gender.as_deref().unwrap_or("-"),
            trip.birth_year.map_or_else(|| "-".to_string(), |y| (y as i32).to_string()),
            row.month(),
            row.day_name(),
        ));
    }
    out
}

fn timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_DISPLAY).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DayFilter, Month, MonthFilter};
    use crate::loader::Dataset;
    use crate::report::TimeReport;

    const CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender
2017-05-05 17:30:00,2017-05-05 17:45:00,900,Canal St,Wells St,Customer,Male
2017-05-12 17:10:00,2017-05-12 17:20:00,600,Lake St,Wells St,Subscriber,
";

    fn dataset() -> Dataset {
        Dataset::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_text_report_has_title() {
        let report = TimeReport::from_dataset(&dataset());
        let text = render_report(&report, OutputFormat::Text).unwrap();
        assert!(text.starts_with("\nTime Statistics...\n"));
        assert!(text.contains("Most Common Month: May"));
    }

    #[test]
    fn test_json_report_is_one_line() {
        let report = TimeReport::from_dataset(&dataset());
        let json = render_report(&report, OutputFormat::Json).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["section"], "Time Statistics");
        assert_eq!(value["most_common_start_hour"], 17);
    }

    #[test]
    fn test_parameters() {
        let selection = FilterSelection {
            city: "chicago".to_string(),
            month: MonthFilter::Only(Month::May),
            day: DayFilter::All,
        };
        let text = render_parameters(&selection, OutputFormat::Text).unwrap();
        assert!(text.contains("Analysis Parameters"));
        assert!(text.contains("Month: May"));

        let json = render_parameters(&selection, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["month"], "may");
        assert_eq!(value["day"], "all");
    }

    #[test]
    fn test_text_rows() {
        let ds = dataset();
        let text = render_rows(ds.rows(), OutputFormat::Text).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0 | 2017-05-05 17:30:00"));
        assert!(lines[2].contains("| Subscriber | - |"));
    }

    #[test]
    fn test_json_rows() {
        let ds = dataset();
        let json = render_rows(ds.rows(), OutputFormat::Json).unwrap();
        let first: serde_json::Value = serde_json::from_str(json.lines().next().unwrap()).unwrap();
        assert_eq!(first["index"], 0);
        assert_eq!(first["start_station"], "Canal St");
        assert_eq!(first["day_of_week"], "friday");
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(
            render_rows(&[], OutputFormat::Text).unwrap(),
            "No more rows to display."
        );
        assert_eq!(render_rows(&[], OutputFormat::Json).unwrap(), "");
    }
}
