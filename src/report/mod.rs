//! Descriptive statistics over a filtered trip dataset.
//!
//! Each reporter is a read-only pass over a [`Dataset`] producing a value that
//! renders as text (`Display`) or JSON (`Serialize`). Optional columns that the
//! source lacks render as [`NO_DATA`] rather than failing.

pub mod duration;
pub mod station;
pub mod tally;
pub mod time;
pub mod user;

use serde::Serialize;
use std::fmt;

use crate::loader::Dataset;

pub use duration::DurationReport;
pub use station::StationReport;
pub use time::TimeReport;
pub use user::UserReport;

pub const NO_DATA: &str = "No Data Available";

/// A statistics section computed from a dataset.
pub trait Report: fmt::Display + Serialize {
    /// Heading printed above the section.
    const TITLE: &'static str;

    fn from_dataset(dataset: &Dataset) -> Self;
}

/// Formats an optional value, falling back to [`NO_DATA`].
pub(crate) fn or_no_data<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}
