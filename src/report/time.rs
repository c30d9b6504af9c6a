use serde::Serialize;
use std::fmt;

use super::tally::Tally;
use super::{Report, or_no_data};
use crate::filter::{calendar_month_name, title_case};
use crate::loader::Dataset;

/// Most frequent times of travel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeReport {
    pub most_common_month: Option<String>,
    pub most_common_day: Option<String>,
    pub most_common_start_hour: Option<u32>,
}

impl Report for TimeReport {
    const TITLE: &'static str = "Time Statistics";

    fn from_dataset(dataset: &Dataset) -> Self {
        let months: Tally<u32> = dataset.rows().iter().map(|r| r.month()).collect();
        let days: Tally<&str> = dataset.rows().iter().map(|r| r.day_name()).collect();
        let hours: Tally<u32> = dataset.rows().iter().map(|r| r.start_hour()).collect();

        Self {
            most_common_month: months
                .mode()
                .and_then(|m| calendar_month_name(*m))
                .map(str::to_string),
            most_common_day: days.mode().map(|d| title_case(d)),
            most_common_start_hour: hours.mode().copied(),
        }
    }
}

impl fmt::Display for TimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most Common Month: {}", or_no_data(self.most_common_month.as_ref()))?;
        writeln!(f, "Most Common Day of Week: {}", or_no_data(self.most_common_day.as_ref()))?;
        write!(f, "Most Common Start Hour: {}", or_no_data(self.most_common_start_hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-05-05 17:30:00,2017-05-05 17:45:00,900,A,B,Customer
2017-05-12 17:10:00,2017-05-12 17:20:00,600,A,B,Customer
2017-06-04 08:00:00,2017-06-04 08:10:00,600,A,B,Customer
";

    #[test]
    fn test_time_modes() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let report = TimeReport::from_dataset(&ds);
        assert_eq!(report.most_common_month.as_deref(), Some("May"));
        assert_eq!(report.most_common_day.as_deref(), Some("Friday"));
        assert_eq!(report.most_common_start_hour, Some(17));
    }

    #[test]
    fn test_empty_dataset_has_no_data() {
        let report = TimeReport::from_dataset(&Dataset::default());
        assert_eq!(report, TimeReport::default());
        let text = report.to_string();
        assert!(text.contains("Most Common Month: No Data Available"));
        assert!(text.contains("Most Common Start Hour: No Data Available"));
    }
}
