//! ovsdb-tool entry point.
//!
//! Parses the command line, initializes logging, loads configuration and
//! runs a single table, bridge or cluster status command.

mod cli;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use ovsdb_common::SystemRunner;

use crate::cli::{Args, Outcome};

/// Initialize tracing/logging.
///
/// RUST_LOG takes precedence over `--log-level`. Logs go to stderr so that
/// JSON on stdout stays machine readable.
fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = match cli::load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(2);
        }
    };
    debug!(?config, "Loaded configuration");

    let stdout = io::stdout();
    match cli::run(&args.command, &config, &SystemRunner, &mut stdout.lock()) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::No) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
