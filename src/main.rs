use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qrmaker::cli::{self, Cli, Outcome};
use qrmaker::services::clock_seed;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "qrmaker=debug"
    } else {
        "qrmaker=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli::run(&cli, clock_seed) {
        Ok(Outcome::Help) => {
            Cli::command().print_long_help()?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Generated(summary)) => {
            print!("{summary}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("Tip: {hint}");
            }
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
