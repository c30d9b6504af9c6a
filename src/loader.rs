//! CSV loading, calendar field derivation, and month/day filtering.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::filter::{DayFilter, FilterSelection, MonthFilter, weekday_name};
use crate::registry::CityRegistry;

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One CSV row as published. Columns not named here are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// A single bike-share trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Seconds.
    pub duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
}

/// A trip plus the calendar fields derived from its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    index: usize,
    trip: Trip,
    month: u32,
    weekday: Weekday,
}

impl Row {
    /// `index` is the 0-based position of the trip in its source.
    pub fn new(index: usize, trip: Trip) -> Self {
        let month = trip.start_time.month();
        let weekday = trip.start_time.weekday();
        Self {
            index,
            trip,
            month,
            weekday,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Calendar month of the start time, 1..=12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Lower-case weekday name of the start time.
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    pub fn start_hour(&self) -> u32 {
        self.trip.start_time.hour()
    }
}

/// Optional columns present in a source's header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    fn from_headers(headers: &StringRecord) -> Self {
        Self {
            has_gender: headers.iter().any(|h| h == GENDER_COLUMN),
            has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
        }
    }
}

/// An ordered set of trips with derived calendar fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(schema: Schema, trips: impl IntoIterator<Item = Trip>) -> Self {
        Self {
            schema,
            rows: trips
                .into_iter()
                .enumerate()
                .map(|(i, trip)| Row::new(i, trip))
                .collect(),
        }
    }

    /// Reads every trip from CSV text with a header row.
    ///
    /// # Errors
    ///
    /// Fails on malformed rows, missing required columns, or timestamps in an
    /// unrecognized format. Nothing is skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let schema = Schema::from_headers(rdr.headers()?);
        debug!(?schema, "CSV headers read");

        let mut rows = Vec::new();
        for (idx, result) in rdr.deserialize::<RawTrip>().enumerate() {
            let raw = result?;
            rows.push(Row::new(idx, raw.into_trip(idx + 1)?));
        }

        Ok(Self { schema, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Rows matching both filters, in their original order.
    pub fn filter(&self, month: MonthFilter, day: DayFilter) -> Dataset {
        Dataset {
            schema: self.schema,
            rows: self
                .rows
                .iter()
                .filter(|row| month.matches(row.month) && day.matches(row.weekday))
                .cloned()
                .collect(),
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RawTrip {
    fn into_trip(self, row: usize) -> Result<Trip, LoadError> {
        Ok(Trip {
            start_time: parse_timestamp(&self.start_time, "Start Time", row)?,
            end_time: parse_timestamp(&self.end_time, "End Time", row)?,
            duration: self.trip_duration,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: self.user_type,
            gender: self.gender.filter(|g| !g.is_empty()),
            birth_year: self.birth_year,
        })
    }
}

fn parse_timestamp(value: &str, column: &'static str, row: usize) -> Result<NaiveDateTime, LoadError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| LoadError::Timestamp {
            column,
            row,
            value: value.to_string(),
        })
}

/// Loads the selected city's trips and applies the month/day filters.
#[tracing::instrument(
    skip(registry, selection),
    fields(city = %selection.city, month = selection.month.as_str(), day = selection.day.as_str())
)]
pub fn load(registry: &CityRegistry, selection: &FilterSelection) -> Result<Dataset, LoadError> {
    let path = registry
        .get(&selection.city)
        .ok_or_else(|| LoadError::UnknownCity {
            city: selection.city.clone(),
        })?;

    let all = Dataset::from_path(path)?;
    let filtered = all.filter(selection.month, selection.day);

    info!(
        path = %path.display(),
        total_rows = all.len(),
        filtered_rows = filtered.len(),
        "Dataset loaded"
    );
    Ok(filtered)
}
