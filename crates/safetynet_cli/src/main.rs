//! Command-line front end for alert queries.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Load the dataset snapshot once and run one query against it.
//! - Print views as pretty JSON on stdout.
//!
//! # Invariants
//! - A snapshot load failure aborts before any query runs.

use clap::{Parser, Subcommand};
use log::error;
use safetynet_core::{
    default_log_level, init_logging, load_snapshot, AlertService, AlertServiceError, LogConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "safetynet", version, about = "Emergency alert queries over a dataset snapshot")]
struct Cli {
    /// Path to the JSON dataset snapshot.
    #[arg(long, env = "SAFETYNET_DATA")]
    data: PathBuf,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "SAFETYNET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "SAFETYNET_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Residents covered by a fire station with child/adult counts.
    Station {
        #[arg(allow_negative_numbers = true)]
        station_number: i32,
    },
    /// Phone numbers of residents covered by a fire station.
    Phones {
        #[arg(allow_negative_numbers = true)]
        station_number: i32,
    },
    /// Children and other household members at an address.
    ChildAlert { address: String },
    /// Dataset collection sizes.
    Counts,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        let mut config = LogConfig::new(level, log_dir.clone());
        config.echo_warnings = true;
        if let Err(err) = init_logging(&config) {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    }

    let store = match load_snapshot(&cli.data) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    let service = AlertService::new(&store);

    let rendered = match cli.command {
        Command::Station { station_number } => service
            .station_roster(station_number)
            .map(|roster| serde_json::to_string_pretty(&roster)),
        Command::Phones { station_number } => {
            Ok(serde_json::to_string_pretty(&service.phone_roster(station_number)))
        }
        Command::ChildAlert { address } => service
            .household_view(&address)
            .map(|view| serde_json::to_string_pretty(&view)),
        Command::Counts => Ok(serde_json::to_string_pretty(&service.dataset_counts())),
    };

    match rendered {
        Ok(Ok(json)) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Ok(Err(err)) => {
            error!("event=cli_output module=cli status=error error={}", err);
            eprintln!("error: failed to render output: {err}");
            ExitCode::FAILURE
        }
        Err(err @ AlertServiceError::AddressNotFound(_)) => {
            eprintln!("not found: {err}");
            ExitCode::from(3)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
