use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

use oem_track::{Config, FeedDocument, FeedStore, TrajectoryQuery};

#[derive(Parser)]
#[command(name = "oem-track")]
#[command(about = "Speed, current sample and ground position from an ephemeris feed")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample count, coverage and average speed
    Summary { file: String },
    /// List epoch identifiers
    Epochs {
        file: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Show one state vector
    State { file: String, epoch: String },
    /// Speed of one state vector
    Speed { file: String, epoch: String },
    /// Approximate latitude, longitude and altitude of one state vector
    Location { file: String, epoch: String },
    /// State vector closest to now (or to --at)
    Now {
        file: String,
        /// RFC 3339 instant to use instead of the current time
        #[arg(long)]
        at: Option<String>,
    },
    /// Header block of the document
    Header { file: String },
    /// Comment lines of the document
    Comments { file: String },
    /// Metadata block of the document
    Metadata { file: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Summary { file } => with_query(config, &file, |q| print_json(&q.summary()?)),
        Commands::Epochs {
            file,
            offset,
            limit,
        } => with_query(config, &file, |q| {
            let limit = limit.unwrap_or(i64::MAX);
            print_json(&q.epochs(offset, limit)?)
        }),
        Commands::State { file, epoch } => {
            with_query(config, &file, |q| print_json(q.state(&epoch)?))
        }
        Commands::Speed { file, epoch } => {
            with_query(config, &file, |q| print_json(&q.speed(&epoch)?))
        }
        Commands::Location { file, epoch } => {
            with_query(config, &file, |q| print_json(&q.location(&epoch)?))
        }
        Commands::Now { file, at } => {
            let instant = match at {
                Some(s) => DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc),
                None => Utc::now(),
            };
            log::info!("current timestamp: {}", instant);
            with_query(config, &file, |q| print_json(&q.now(instant)?))
        }
        Commands::Header { file } => print_json(&FeedDocument::from_file(&file)?.header),
        Commands::Comments { file } => print_json(&FeedDocument::from_file(&file)?.comments),
        Commands::Metadata { file } => print_json(&FeedDocument::from_file(&file)?.metadata),
    }
}

/// Loads the document, publishes it, and runs `f` against the published
/// trajectory.
fn with_query<F>(config: &Config, file: &str, f: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(TrajectoryQuery<'_>) -> Result<(), Box<dyn std::error::Error>>,
{
    let store = FeedStore::new();
    store.publish(FeedDocument::from_file(file)?.to_trajectory()?);

    let trajectory = store.trajectory().ok_or("no trajectory loaded")?;
    let query = TrajectoryQuery::new(&trajectory)
        .with_index(config.time_index()?)
        .with_projector(config.projector());
    f(query)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
