//! CLI entry point for the bikeshare explorer.
//!
//! Runs the interactive analysis session by default, and provides
//! subcommands for one-shot reports and listing the configured cities.

use anyhow::{Result, bail};
use bikeshare::{
    console::LineConsole,
    filter::{DayFilter, FilterSelection, MonthFilter},
    loader::load,
    output::OutputFormat,
    registry::CityRegistry,
    session::{self, Session},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore bike share trip data interactively", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV files, replacing the built-in cities
    #[arg(long, env = "BIKESHARE_CITIES", global = true)]
    cities: Option<PathBuf>,

    /// How reports are printed
    #[arg(long, value_enum, env = "BIKESHARE_FORMAT", default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose filters interactively and print statistics (the default)
    Explore,
    /// Print statistics for the given filters without prompting
    Report {
        /// City to analyze, e.g. "new york city"
        #[arg(short, long)]
        city: String,

        /// Month name (january to june) or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// Weekday name or "all"
        #[arg(short, long, default_value = "all")]
        day: DayFilter,
    },
    /// List configured cities and their data files
    Cities,
}

fn env_directives(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Builds a layer filter from `directives` (the value of a `RUST_LOG`-style
/// variable), using `default` only when no directives are given.
fn log_filter(default: LevelFilter, directives: Option<&str>) -> Result<EnvFilter> {
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .parse(directives.unwrap_or_default())?;
    Ok(filter)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr (prompts share the terminal) + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(log_filter(LevelFilter::WARN, env_directives("RUST_LOG").as_deref())?);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(log_filter(LevelFilter::DEBUG, env_directives("RUST_LOG_JSON").as_deref())?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let registry = match &cli.cities {
        Some(path) => CityRegistry::load(path, &cli.data_dir)?,
        None => CityRegistry::builtin(&cli.data_dir),
    };
    debug!(cities = registry.cities().count(), data_dir = %cli.data_dir.display(), "Registry ready");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let mut console = LineConsole::stdio();
            session::run(&mut console, &registry, cli.format)?;
        }
        Commands::Report { city, month, day } => {
            if !registry.contains(&city) {
                bail!(
                    "Unknown city '{}'. Known cities: {}",
                    city,
                    registry.cities().collect::<Vec<_>>().join(", ")
                );
            }
            let selection = FilterSelection {
                city: city.trim().to_lowercase(),
                month,
                day,
            };
            let dataset = load(&registry, &selection)?;
            let mut console = LineConsole::stdio();
            Session::new(selection).report(&mut console, &dataset, cli.format)?;
        }
        Commands::Cities => {
            for (city, path) in registry.iter() {
                let available = path.exists();
                info!(city, path = %path.display(), available, "City");
                println!("{city}\t{}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare::filter::Month;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::{debug, info, warn};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Emits one event per level through `filter` and returns what got logged.
    fn captured(filter: EnvFilter) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .with_filter(filter),
        );
        tracing::subscriber::with_default(subscriber, || {
            debug!("debug event");
            info!("info event");
            warn!("warn event");
        });
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_filter_defaults_when_unset() {
        let out = captured(log_filter(LevelFilter::WARN, None).unwrap());
        assert!(out.contains("warn event"));
        assert!(!out.contains("info event"));

        let out = captured(log_filter(LevelFilter::WARN, Some("")).unwrap());
        assert!(!out.contains("info event"));
    }

    #[test]
    fn test_log_filter_env_value_wins_over_default() {
        let out = captured(log_filter(LevelFilter::WARN, Some("debug")).unwrap());
        assert!(out.contains("debug event"));
        assert!(out.contains("info event"));

        let out = captured(log_filter(LevelFilter::DEBUG, Some("error")).unwrap());
        assert!(!out.contains("warn event"));
        assert!(!out.contains("debug event"));
    }

    #[test]
    fn test_log_filter_rejects_bad_directives() {
        assert!(log_filter(LevelFilter::WARN, Some("bikeshare=notalevel")).is_err());
    }

    #[test]
    fn test_cli_defaults_to_explore() {
        let cli = Cli::try_parse_from(["bikeshare"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_report_arguments() {
        let cli = Cli::try_parse_from([
            "bikeshare",
            "report",
            "--city",
            "new york city",
            "--month",
            "May",
            "--day",
            "friday",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Report { city, month, day }) => {
                assert_eq!(city, "new york city");
                assert_eq!(month, MonthFilter::Only(Month::May));
                assert_eq!(day, DayFilter::Only(chrono::Weekday::Fri));
            }
            _ => panic!("expected the report command"),
        }
    }

    #[test]
    fn test_cli_report_filters_default_to_all() {
        let cli = Cli::try_parse_from(["bikeshare", "report", "-c", "chicago"]).unwrap();
        match cli.command {
            Some(Commands::Report { month, day, .. }) => {
                assert_eq!(month, MonthFilter::All);
                assert_eq!(day, DayFilter::All);
            }
            _ => panic!("expected the report command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_month() {
        assert!(Cli::try_parse_from(["bikeshare", "report", "-c", "chicago", "-m", "july"]).is_err());
    }

    #[test]
    fn test_cli_cities_with_data_dir() {
        let cli = Cli::try_parse_from(["bikeshare", "cities", "--data-dir", "/srv/trips"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Cities)));
        assert_eq!(cli.data_dir, PathBuf::from("/srv/trips"));
    }
}
