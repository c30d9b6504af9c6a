//! Interactive filter selection as an explicit state machine.
//!
//! ```text
//! AskCity -> AskFilterMode -> {AskMonth | AskDay | AskMonth+AskDay | none}
//!         -> Confirm -> {Accepted | AskFilterMode}
//! ```
//!
//! Invalid answers keep the machine in the state that asked. The city is
//! chosen once; declining the confirmation goes back to the filter mode only.

use std::str::FromStr;
use tracing::{debug, info};

use crate::console::Console;
use crate::error::PromptError;
use crate::filter::{DayFilter, FilterSelection, MonthFilter};
use crate::registry::CityRegistry;

pub const INVALID_CITY: &str = "Invalid city name. Please try again.\n";
pub const INVALID_MONTH: &str = "Invalid month. Please try again.\n";
pub const INVALID_DAY: &str = "Invalid day of the week. Please try again.\n";
pub const INVALID_CONFIRMATION: &str = "Invalid input. Please Choose 'yes' or 'no'.\n";

/// Which filter dimensions the operator wants to constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Month,
    Day,
    Both,
    None,
}

impl FromStr for FilterMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(FilterMode::Month),
            "day" => Ok(FilterMode::Day),
            "both" => Ok(FilterMode::Both),
            "none" => Ok(FilterMode::None),
            _ => Err(()),
        }
    }
}

/// Parses a case-insensitive `yes`/`no` answer.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    AskCity,
    AskFilterMode { city: String },
    /// `then_day` is set in `both` mode, where the day question follows.
    AskMonth { city: String, then_day: bool },
    AskDay { city: String, month: MonthFilter },
    Confirm(FilterSelection),
    Accepted(FilterSelection),
}

/// Result of feeding one answer to a [`PromptState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: PromptState,
    /// Printed before the next question, e.g. a validation message.
    pub feedback: Option<&'static str>,
}

impl Step {
    fn to(next: PromptState) -> Self {
        Self {
            next,
            feedback: None,
        }
    }

    fn stay(state: PromptState, feedback: Option<&'static str>) -> Self {
        Self {
            next: state,
            feedback,
        }
    }
}

impl PromptState {
    /// Text shown when asking for this state's answer.
    pub fn question(&self, registry: &CityRegistry) -> String {
        match self {
            PromptState::AskCity => format!(
                "Choose a city name ({}): ",
                registry.cities().collect::<Vec<_>>().join(", ")
            ),
            PromptState::AskFilterMode { .. } => {
                "Would you like to filter by month, day, both, or none? ".to_string()
            }
            PromptState::AskMonth { .. } => "Choose a month to filter by (january, february, \
                 march, april, may, or june) or 'all': "
                .to_string(),
            PromptState::AskDay { .. } => "Choose a day of the week to filter by (e.g., monday, \
                 tuesday, ..., sunday) or 'all': "
                .to_string(),
            PromptState::Confirm(selection) => format!(
                "\nSelected Filters:\n{}\n\nAre these filters correct? \
                 Choose 'yes' to proceed or 'no' to edit: ",
                selection.summary()
            ),
            PromptState::Accepted(_) => String::new(),
        }
    }

    /// Applies one operator answer. Never fails: bad input leaves the state unchanged.
    pub fn advance(self, input: &str, registry: &CityRegistry) -> Step {
        match self {
            PromptState::AskCity => {
                if registry.contains(input) {
                    Step::to(PromptState::AskFilterMode {
                        city: input.trim().to_lowercase(),
                    })
                } else {
                    Step::stay(PromptState::AskCity, Some(INVALID_CITY))
                }
            }
            PromptState::AskFilterMode { city } => match input.parse::<FilterMode>() {
                Ok(FilterMode::None) => Step::to(PromptState::Confirm(FilterSelection {
                    city,
                    month: MonthFilter::All,
                    day: DayFilter::All,
                })),
                Ok(FilterMode::Month) => Step::to(PromptState::AskMonth {
                    city,
                    then_day: false,
                }),
                Ok(FilterMode::Both) => Step::to(PromptState::AskMonth {
                    city,
                    then_day: true,
                }),
                Ok(FilterMode::Day) => Step::to(PromptState::AskDay {
                    city,
                    month: MonthFilter::All,
                }),
                Err(()) => Step::stay(PromptState::AskFilterMode { city }, None),
            },
            PromptState::AskMonth { city, then_day } => match input.parse::<MonthFilter>() {
                Ok(month) if then_day => Step::to(PromptState::AskDay { city, month }),
                Ok(month) => Step::to(PromptState::Confirm(FilterSelection {
                    city,
                    month,
                    day: DayFilter::All,
                })),
                Err(_) => Step::stay(PromptState::AskMonth { city, then_day }, Some(INVALID_MONTH)),
            },
            PromptState::AskDay { city, month } => match input.parse::<DayFilter>() {
                Ok(day) => Step::to(PromptState::Confirm(FilterSelection { city, month, day })),
                Err(_) => Step::stay(PromptState::AskDay { city, month }, Some(INVALID_DAY)),
            },
            PromptState::Confirm(selection) => match parse_yes_no(input) {
                Some(true) => Step::to(PromptState::Accepted(selection)),
                Some(false) => Step::to(PromptState::AskFilterMode {
                    city: selection.city,
                }),
                None => Step::stay(PromptState::Confirm(selection), Some(INVALID_CONFIRMATION)),
            },
            accepted @ PromptState::Accepted(_) => Step::to(accepted),
        }
    }
}

/// Reads one answer, treating end of input as fatal.
pub fn ask<C: Console>(console: &mut C, question: &str) -> Result<String, PromptError> {
    console.read_line(question)?.ok_or(PromptError::InputClosed)
}

/// Runs the prompt machine until the operator confirms a selection.
pub fn collect_filters<C: Console>(
    console: &mut C,
    registry: &CityRegistry,
) -> Result<FilterSelection, PromptError> {
    console.write_line("\nWelcome to the bike sharing data analysis tool!\n")?;

    let mut state = PromptState::AskCity;
    loop {
        state = match state {
            PromptState::Accepted(selection) => {
                info!(
                    city = %selection.city,
                    month = selection.month.as_str(),
                    day = selection.day.as_str(),
                    "Filters confirmed"
                );
                return Ok(selection);
            }
            pending => {
                let answer = ask(console, &pending.question(registry))?;
                let step = pending.advance(&answer, registry);
                debug!(answer = %answer, next = ?step.next, "Prompt answered");
                if let Some(feedback) = step.feedback {
                    console.write_line(feedback)?;
                }
                step.next
            }
        };
    }
}
