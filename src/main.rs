//! Sigkey - recover the Signal Desktop database key.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sigkey::cli::{execute, output, retain_known, Cli};
use sigkey::core::constants::LOG_ENV;

fn main() -> ExitCode {
    let retained = retain_known(std::env::args_os());
    let cli = match Cli::try_parse_from(&retained.args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };
    let config = cli.run_config();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if config.verbose {
            EnvFilter::new("sigkey=debug")
        } else {
            EnvFilter::new("sigkey=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    for arg in &retained.ignored {
        debug!(arg = ?arg, "ignoring unrecognized argument");
    }

    match execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
