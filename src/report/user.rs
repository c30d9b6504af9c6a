use serde::Serialize;
use std::fmt;

use super::tally::Tally;
use super::{NO_DATA, Report, or_no_data};
use crate::loader::Dataset;

/// Earliest, most recent, and most common birth years.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BirthYears {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// Rider demographics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserReport {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the source has no gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the source has no birth year column.
    pub birth_years: Option<BirthYears>,
}

impl Report for UserReport {
    const TITLE: &'static str = "User Statistics";

    fn from_dataset(dataset: &Dataset) -> Self {
        let trips = dataset.rows().iter().map(|r| r.trip());
        let schema = dataset.schema();

        let user_types: Tally<String> = trips.clone().map(|t| t.user_type.clone()).collect();

        let genders = schema.has_gender.then(|| {
            trips
                .clone()
                .filter_map(|t| t.gender.clone())
                .collect::<Tally<String>>()
                .value_counts()
        });

        let birth_years = schema.has_birth_year.then(|| {
            // years are published as decimals ("1992.0"); report whole years
            let years: Vec<i32> = trips
                .clone()
                .filter_map(|t| t.birth_year)
                .map(|y| y as i32)
                .collect();
            let tally: Tally<i32> = years.iter().copied().collect();
            BirthYears {
                earliest: years.iter().min().copied(),
                most_recent: years.iter().max().copied(),
                most_common: tally.mode().copied(),
            }
        });

        Self {
            user_types: user_types.value_counts(),
            genders,
            birth_years,
        }
    }
}

impl fmt::Display for UserReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Types Counts:")?;
        if self.user_types.is_empty() {
            writeln!(f, "{NO_DATA}")?;
        }
        for (user_type, count) in &self.user_types {
            writeln!(f, "{user_type}s: {count}")?;
        }

        match &self.genders {
            Some(genders) => {
                writeln!(f, "\nGender Counts:")?;
                if genders.is_empty() {
                    writeln!(f, "{NO_DATA}")?;
                }
                for (gender, count) in genders {
                    writeln!(f, "{gender}: {count}")?;
                }
            }
            None => writeln!(f, "\nGender: {NO_DATA}")?,
        }

        match &self.birth_years {
            Some(years) => {
                writeln!(f, "\nBirth Year Statistics:")?;
                writeln!(f, "Earliest Birth Year: {}", or_no_data(years.earliest))?;
                writeln!(f, "Most Recent Birth Year: {}", or_no_data(years.most_recent))?;
                write!(f, "Most Common Birth Year: {}", or_no_data(years.most_common))
            }
            None => write!(f, "\nBirth Year: {NO_DATA}"),
        }
    }
}
