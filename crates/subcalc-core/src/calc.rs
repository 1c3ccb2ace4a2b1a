//! The four arithmetic operations behind the CLI subcommands.

use std::fmt;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    /// Apply the operation to `a` and `b`.
    pub fn apply(self, a: i64, b: i64) -> Result<Outcome, CalcError> {
        match self {
            Operation::Add => add(a, b).map(Outcome::Integer),
            Operation::Subtract => subtract(a, b).map(Outcome::Integer),
            Operation::Multiply => multiply(a, b).map(Outcome::Integer),
            Operation::Divide => divide(a, b).map(Outcome::Float),
        }
    }
}

/// Result of an operation. Division always yields a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Integer(i) => write!(f, "{i}"),
            Outcome::Float(x) => write!(f, "{x}"),
        }
    }
}

pub fn add(a: i64, b: i64) -> Result<i64, CalcError> {
    a.checked_add(b).ok_or(CalcError::Overflow("add"))
}

pub fn subtract(a: i64, b: i64) -> Result<i64, CalcError> {
    a.checked_sub(b).ok_or(CalcError::Overflow("subtract"))
}

pub fn multiply(a: i64, b: i64) -> Result<i64, CalcError> {
    a.checked_mul(b).ok_or(CalcError::Overflow("multiply"))
}

/// Floating-point division; `b == 0` is reported rather than producing
/// infinity.
pub fn divide(a: i64, b: i64) -> Result<f64, CalcError> {
    if b == 0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a as f64 / b as f64)
}
