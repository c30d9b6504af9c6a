use serde::Serialize;
use std::fmt;

use super::tally::Tally;
use super::{Report, or_no_data};
use crate::loader::Dataset;

/// Joins start and end station names into a trip label.
pub const TRIP_SEPARATOR: &str = " to ";

/// Most popular stations and trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationReport {
    pub most_common_start_station: Option<String>,
    pub most_common_end_station: Option<String>,
    pub most_common_trip: Option<String>,
}

impl Report for StationReport {
    const TITLE: &'static str = "Station Statistics";

    fn from_dataset(dataset: &Dataset) -> Self {
        let trips = dataset.rows().iter().map(|r| r.trip());

        let starts: Tally<&str> = trips.clone().map(|t| t.start_station.as_str()).collect();
        let ends: Tally<&str> = trips.clone().map(|t| t.end_station.as_str()).collect();
        let pairs: Tally<String> = trips
            .map(|t| format!("{}{}{}", t.start_station, TRIP_SEPARATOR, t.end_station))
            .collect();

        Self {
            most_common_start_station: starts.mode().map(|s| s.to_string()),
            most_common_end_station: ends.mode().map(|s| s.to_string()),
            most_common_trip: pairs.mode().cloned(),
        }
    }
}

impl fmt::Display for StationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Most Commonly Used Start Station: {}",
            or_no_data(self.most_common_start_station.as_ref())
        )?;
        writeln!(
            f,
            "Most Commonly Used End Station: {}",
            or_no_data(self.most_common_end_station.as_ref())
        )?;
        write!(
            f,
            "Most Frequent Trip (Start Station to End Station): {}",
            or_no_data(self.most_common_trip.as_ref())
        )
    }
}
