//! Subcommand definitions and the two dispatch styles.
//!
//! `add` and `subtract` are *callback style*: each argument struct knows how
//! to run itself through [`Execute`], and `main` just hands over control.
//! `multiply` and `divide` are *got-subcommand style*: their argument
//! structs are plain data, and [`run_matched`] inspects which subcommand was
//! parsed and runs the operation from the match arm.
//!
//! Operand styles are mixed the same way: `add` and `multiply` take
//! positional operands, `subtract` and `divide` take `--a`/`--b`.

use clap::{Args, Subcommand};
use subcalc_core::{CalcError, Operation};

use crate::report::Report;

#[derive(Subcommand)]
pub enum Commands {
    /// Addition operation
    #[command(allow_negative_numbers = true)]
    Add(AddArgs),
    /// Subtraction operation
    #[command(allow_negative_numbers = true)]
    Subtract(SubtractArgs),
    /// Multiplication operation
    #[command(alias = "mul", allow_negative_numbers = true)]
    Multiply(PositionalOperands),
    /// Division operation
    #[command(allow_negative_numbers = true)]
    Divide(KeywordOperands),
}

#[derive(Args)]
pub struct AddArgs {
    /// First operand
    pub a: i64,
    /// Second operand
    pub b: i64,
}

#[derive(Args)]
pub struct SubtractArgs {
    /// First operand
    #[arg(long)]
    pub a: i64,
    /// Second operand
    #[arg(long)]
    pub b: i64,
}

#[derive(Args)]
pub struct PositionalOperands {
    /// First operand
    pub a: i64,
    /// Second operand
    pub b: i64,
}

#[derive(Args)]
pub struct KeywordOperands {
    /// First operand
    #[arg(long)]
    pub a: i64,
    /// Second operand
    #[arg(long)]
    pub b: i64,
}

/// A subcommand that runs itself once parsed.
pub trait Execute {
    fn execute(&self, report: &mut Report) -> Result<(), CalcError>;
}

impl Execute for AddArgs {
    fn execute(&self, report: &mut Report) -> Result<(), CalcError> {
        run(Operation::Add, self.a, self.b, report)
    }
}

impl Execute for SubtractArgs {
    fn execute(&self, report: &mut Report) -> Result<(), CalcError> {
        run(Operation::Subtract, self.a, self.b, report)
    }
}

impl Commands {
    /// The callback for this subcommand, if it was registered with one.
    pub fn callback(&self) -> Option<&dyn Execute> {
        match self {
            Commands::Add(args) => Some(args as &dyn Execute),
            Commands::Subtract(args) => Some(args as &dyn Execute),
            Commands::Multiply(_) | Commands::Divide(_) => None,
        }
    }
}

/// Run whichever match-dispatched subcommand was parsed. Returns `None`
/// when the parsed subcommand is not one of them.
pub fn run_matched(command: &Commands, report: &mut Report) -> Option<Result<(), CalcError>> {
    match command {
        Commands::Multiply(args) => Some(run(Operation::Multiply, args.a, args.b, report)),
        Commands::Divide(args) => Some(run(Operation::Divide, args.a, args.b, report)),
        Commands::Add(_) | Commands::Subtract(_) => None,
    }
}

fn run(op: Operation, a: i64, b: i64, report: &mut Report) -> Result<(), CalcError> {
    let outcome = op.apply(a, b);
    tracing::debug!(operation = op.name(), a, b, ok = outcome.is_ok(), "operation evaluated");
    report.operation(op, a, b, &outcome);
    outcome.map(|_| ())
}
