//! Calendar filter vocabulary and the confirmed filter selection.

use chrono::Weekday;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Months covered by the published trip data, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-indexed calendar month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }
}

/// Weekdays in the order they are offered to the operator.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lower-case full weekday name, e.g. `"monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Calendar month name for any month number 1..=12.
pub fn calendar_month_name(number: u32) -> Option<&'static str> {
    u8::try_from(number)
        .ok()
        .and_then(|n| chrono::Month::try_from(n).ok())
        .map(|m| m.name())
}

/// Month filter: either no constraint or a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

/// Weekday filter: either no constraint or a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized filter value '{0}'")]
pub struct UnknownFilterValue(pub String);

impl FromStr for MonthFilter {
    type Err = UnknownFilterValue;

    /// Accepts `all` or a full month name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if input == "all" {
            return Ok(MonthFilter::All);
        }
        Month::ALL
            .into_iter()
            .find(|m| m.name() == input)
            .map(MonthFilter::Only)
            .ok_or(UnknownFilterValue(input))
    }
}

impl FromStr for DayFilter {
    type Err = UnknownFilterValue;

    /// Accepts `all` or a full weekday name, case-insensitive. Abbreviations are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if input == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d) == input)
            .map(DayFilter::Only)
            .ok_or(UnknownFilterValue(input))
    }
}

impl MonthFilter {
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m.number() == month,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonthFilter::All => "all",
            MonthFilter::Only(m) => m.name(),
        }
    }
}

impl DayFilter {
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => d == day,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayFilter::All => "all",
            DayFilter::Only(d) => weekday_name(d),
        }
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for DayFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A confirmed `(city, month, day)` choice for one session iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub city: String,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    /// Display lines shared by the confirmation step and the report header.
    pub fn summary(&self) -> String {
        format!(
            "City: {}\nMonth: {}\nDay of Week: {}",
            title_case(&self.city),
            title_case(self.month.as_str()),
            title_case(self.day.as_str())
        )
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Any non-alphabetic character starts a new word, so `"winston-salem"`
/// becomes `"Winston-Salem"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_numbers_are_one_indexed() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::May.number(), 5);
        assert_eq!(Month::June.number(), 6);
    }

    #[test]
    fn test_parse_month_filter() {
        assert_eq!("all".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!("MAY".parse::<MonthFilter>(), Ok(MonthFilter::Only(Month::May)));
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("jan".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_parse_day_filter() {
        assert_eq!("All".parse::<DayFilter>(), Ok(DayFilter::All));
        assert_eq!(
            " Friday ".parse::<DayFilter>(),
            Ok(DayFilter::Only(Weekday::Fri))
        );
        assert!("fri".parse::<DayFilter>().is_err());
        assert!("someday".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_calendar_month_name() {
        assert_eq!(calendar_month_name(1), Some("January"));
        assert_eq!(calendar_month_name(12), Some("December"));
        assert_eq!(calendar_month_name(13), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case("all"), "All");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_breaks_words_on_punctuation() {
        assert_eq!(title_case("winston-salem"), "Winston-Salem");
        assert_eq!(title_case("st. LOUIS"), "St. Louis");
        assert_eq!(title_case("area 51east"), "Area 51East");
    }

    #[test]
    fn test_summary() {
        let selection = FilterSelection {
            city: "new york city".to_string(),
            month: MonthFilter::Only(Month::March),
            day: DayFilter::All,
        };
        assert_eq!(
            selection.summary(),
            "City: New York City\nMonth: March\nDay of Week: All"
        );
    }
}
