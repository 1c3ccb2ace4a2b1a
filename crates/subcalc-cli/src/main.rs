//! `subcalc` — a tiny calculator demonstrating argument and dispatch styles.
//!
//! ## Usage
//!
//! ```sh
//! # Positional operands, callback dispatch
//! subcalc add 1 2
//!
//! # Keyword operands, callback dispatch
//! subcalc subtract --a 7 --b 10
//!
//! # Positional operands, match dispatch (alias: mul)
//! subcalc multiply 6 7
//!
//! # Keyword operands, match dispatch
//! subcalc divide --a 10 --b 4
//!
//! # Load a config file and print the result as pretty JSON
//! subcalc -c config.toml --json --pretty add 1 2
//! ```
//!
//! After the subcommand runs, the configuration (defaults when `-c` is not
//! given) is printed. Division by zero and overflow exit with status 1.
//! Set `RUST_LOG=debug` for diagnostics on stderr.

mod commands;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Commands;
use report::Report;

#[derive(Parser)]
#[command(
    name = "subcalc",
    version,
    about = "Calculator CLI demonstrating different subcommand styles"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the result as a JSON document
    #[arg(long, global = true)]
    json: bool,

    /// Indent the JSON document (requires --json)
    #[arg(long, global = true, requires = "json")]
    pretty: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut report = Report::new(cli.json, cli.pretty)?;

    let mut status = ExitCode::SUCCESS;
    if let Some(command) = &cli.command {
        let result = match command.callback() {
            Some(callback) => Some(callback.execute(&mut report)),
            None => commands::run_matched(command, &mut report),
        };
        if let Some(Err(err)) = result {
            tracing::debug!(error = %err, "subcommand failed");
            status = ExitCode::FAILURE;
        }
    }

    let conf = subcalc_core::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    report.config(&conf)?;
    report.finish();

    Ok(status)
}
