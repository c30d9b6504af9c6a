use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::tally::mean;
use super::{NO_DATA, Report};
use crate::loader::Dataset;

/// Total and mean trip durations, in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationReport {
    pub total_seconds: f64,
    pub mean_seconds: Option<f64>,
    /// `None` when the source has no gender column.
    pub total_seconds_by_gender: Option<BTreeMap<String, f64>>,
}

impl Report for DurationReport {
    const TITLE: &'static str = "Trip Duration Statistics";

    fn from_dataset(dataset: &Dataset) -> Self {
        let durations: Vec<f64> = dataset.rows().iter().map(|r| r.trip().duration).collect();

        let total_seconds_by_gender = dataset.schema().has_gender.then(|| {
            let mut by_gender = BTreeMap::new();
            for trip in dataset.rows().iter().map(|r| r.trip()) {
                if let Some(gender) = &trip.gender {
                    *by_gender.entry(gender.clone()).or_insert(0.0) += trip.duration;
                }
            }
            by_gender
        });

        Self {
            total_seconds: durations.iter().sum(),
            mean_seconds: mean(&durations),
            total_seconds_by_gender,
        }
    }
}

impl fmt::Display for DurationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Travel Time: {} seconds", self.total_seconds)?;

        match &self.total_seconds_by_gender {
            Some(by_gender) => {
                writeln!(f, "\nTotal Travel Time per Gender:")?;
                for (gender, seconds) in by_gender {
                    writeln!(f, "{gender}: {seconds} seconds")?;
                }
            }
            None => writeln!(f, "\nTotal Travel Time per Gender: {NO_DATA}")?,
        }

        match self.mean_seconds {
            Some(m) => write!(f, "\nMean Travel Time: {m} seconds"),
            None => write!(f, "\nMean Travel Time: {NO_DATA}"),
        }
    }
}
