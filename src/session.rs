//! The interactive analysis loop: prompt, load, report, page, restart.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info};

use crate::console::Console;
use crate::filter::FilterSelection;
use crate::loader::{Dataset, load};
use crate::output::{DIVIDER, OutputFormat, render_parameters, render_report, render_rows};
use crate::paging::RawPager;
use crate::prompt::{ask, collect_filters, parse_yes_no};
use crate::registry::CityRegistry;
use crate::report::{DurationReport, Report, StationReport, TimeReport, UserReport};

pub const RAW_DATA_QUESTION: &str =
    "Would you like to see 5 lines of raw data? Choose 'yes' or 'no': ";
pub const RESTART_QUESTION: &str =
    "Would you like to restart the analysis? Enter 'yes' or 'no': ";
pub const INVALID_YES_NO: &str = "Invalid input. Please Enter 'yes' or 'no'.\n";

/// State carried through one analysis iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub selection: FilterSelection,
    pub pager: RawPager,
}

impl Session {
    pub fn new(selection: FilterSelection) -> Self {
        Self {
            selection,
            pager: RawPager::default(),
        }
    }

    /// Prints the four statistics sections in their fixed order.
    pub fn report<C: Console>(
        &self,
        console: &mut C,
        dataset: &Dataset,
        format: OutputFormat,
    ) -> Result<()> {
        console.write_line(&render_parameters(&self.selection, format)?)?;
        print_section::<TimeReport, C>(console, dataset, format)?;
        print_section::<StationReport, C>(console, dataset, format)?;
        print_section::<DurationReport, C>(console, dataset, format)?;
        print_section::<UserReport, C>(console, dataset, format)?;
        Ok(())
    }

    /// Shows raw rows five at a time until the operator says `no`.
    pub fn page_raw_rows<C: Console>(
        &mut self,
        console: &mut C,
        dataset: &Dataset,
        format: OutputFormat,
    ) -> Result<()> {
        loop {
            if format == OutputFormat::Text {
                console.write_line(&format!("{DIVIDER}\n"))?;
            }
            let answer = ask(console, RAW_DATA_QUESTION)?;
            match parse_yes_no(&answer) {
                Some(true) => {
                    let page = self.pager.next_page(dataset);
                    debug!(offset = self.pager.offset(), rows = page.len(), "Raw page");
                    console.write_line(&render_rows(page, format)?)?;
                    console.write_line("")?;
                }
                Some(false) => {
                    console.write_line("")?;
                    return Ok(());
                }
                None => console.write_line(INVALID_YES_NO)?,
            }
        }
    }
}

fn print_section<R: Report, C: Console>(
    console: &mut C,
    dataset: &Dataset,
    format: OutputFormat,
) -> Result<()> {
    let started = Instant::now();
    let report = R::from_dataset(dataset);
    console.write_line(&render_report(&report, format)?)?;

    let elapsed = started.elapsed();
    debug!(section = R::TITLE, elapsed_ms = elapsed.as_millis() as u64, "Section computed");
    if format == OutputFormat::Text {
        console.write_line(&format!("\n\nThis took {} seconds.", elapsed.as_secs_f64()))?;
        console.write_line(DIVIDER)?;
    }
    Ok(())
}

/// Runs analysis iterations until the operator declines to restart.
///
/// # Errors
///
/// Data source failures and closed input end the session with an error.
pub fn run<C: Console>(console: &mut C, registry: &CityRegistry, format: OutputFormat) -> Result<()> {
    let mut iteration = 0usize;
    loop {
        iteration += 1;
        let selection = collect_filters(console, registry)?;
        let dataset = load(registry, &selection)
            .with_context(|| format!("Failed to load trip data for {}", selection.city))?;

        let mut session = Session::new(selection);
        session.report(console, &dataset, format)?;
        session.page_raw_rows(console, &dataset, format)?;

        // only an exact (case-insensitive) "yes" restarts; end of input is a "no"
        let restart = console
            .read_line(RESTART_QUESTION)?
            .is_some_and(|answer| answer.to_lowercase() == "yes");
        if !restart {
            info!(iterations = iteration, "Session finished");
            return Ok(());
        }
        debug!(iteration, "Restarting analysis");
    }
}
