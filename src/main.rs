use clap::{Parser, Subcommand};
use geo_matcher::config::{LoggingSettings, OutputFormat, Settings};
use geo_matcher::models::{MatchReport, NearestAirport};
use geo_matcher::services::{closest_airport, load_airports_csv, load_points_csv, AirportError};
use geo_matcher::{GeoError, Matcher};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "geo-matcher")]
#[command(about = "Great-circle distance and nearest-neighbor matching for lat/lon coordinates", long_about = None)]
struct Cli {
    /// Configuration file (defaults to config/default.toml and config/local.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overrides output.format from the configuration
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the airport closest to a location
    Nearest {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Airports CSV with code,name,lat,lon columns (defaults to airports.path)
        #[arg(short, long)]
        airports: Option<PathBuf>,
    },

    /// Match every point of one CSV to the closest point of another
    Match {
        /// CSV with lat,lon columns to match from
        #[arg(short, long)]
        source: PathBuf,

        /// CSV with lat,lon columns to match against
        #[arg(short, long)]
        target: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("no airports CSV given; pass --airports or set airports.path")]
    MissingAirports,

    #[error(transparent)]
    Airport(#[from] AirportError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    init_logging(&settings.logging);

    match run(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// LOG_LEVEL and LOG_FORMAT take precedence over the configuration file
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn run(cli: Cli, settings: &Settings) -> Result<(), CliError> {
    let format = cli.format.unwrap_or(settings.output.format);

    match cli.command {
        Command::Nearest { lat, lon, airports } => {
            let path = airports
                .or_else(|| settings.airports.path.as_ref().map(PathBuf::from))
                .ok_or(CliError::MissingAirports)?;

            let airports = load_airports_csv(&path)?;
            info!("Loaded {} airports from {}", airports.len(), path.display());

            let nearest = closest_airport((lat, lon), &airports)?;
            print_nearest(&nearest, format)
        }
        Command::Match { source, target } => {
            let source = load_points_csv(&source)?;
            let target = load_points_csv(&target)?;

            let matcher = Matcher::new(&target)?;
            let report = MatchReport {
                matches: matcher.match_all(&source)?,
                total_targets: matcher.len(),
            };
            info!(
                "Matched {} source points against {} targets",
                report.matches.len(),
                report.total_targets
            );
            print_report(&report, format)
        }
    }
}

fn print_nearest(nearest: &NearestAirport, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(nearest)?),
        OutputFormat::Text => println!(
            "{}\t{}\t{:.1} m",
            nearest.airport.code, nearest.airport.name, nearest.distance_m
        ),
    }
    Ok(())
}

fn print_report(report: &MatchReport, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            for m in &report.matches {
                println!(
                    "{}\t({}, {})\t->\t{}\t({}, {})\t{:.1} m",
                    m.source_index,
                    m.source.0,
                    m.source.1,
                    m.target_index,
                    m.target.0,
                    m.target.1,
                    m.distance_m
                );
            }
        }
    }
    Ok(())
}
