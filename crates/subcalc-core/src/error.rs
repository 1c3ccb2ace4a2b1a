//! Error types for document building, configuration loading and arithmetic.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`JsonDocument`](crate::JsonDocument) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    /// Storage for the root object could not be reserved.
    #[error("failed to allocate document storage: {0}")]
    Allocation(String),

    /// A nested handle was used after `clear`, after its key was overwritten,
    /// or against a document that did not issue it.
    #[error("nested object handle is stale or belongs to another document")]
    StaleHandle,

    /// JSON has no representation for NaN or infinity.
    #[error("cannot render non-finite float {value} under key '{key}'")]
    NonFiniteFloat { key: String, value: f64 },
}

/// Errors raised while loading a [`ConfigRecord`](crate::ConfigRecord).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A non-empty path was given but nothing exists there.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML, or a known key has the wrong type.
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Arithmetic failures. Both are expected outcomes rather than faults.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("integer overflow in {0}")]
    Overflow(&'static str),
}

/// Convenience alias used by the document builder.
pub type Result<T> = std::result::Result<T, JsonError>;
