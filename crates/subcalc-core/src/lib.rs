//! # subcalc-core
//!
//! Library side of `subcalc`, a small calculator CLI that demonstrates
//! different argument-parsing and subcommand-dispatch styles.
//!
//! The main piece is [`JsonDocument`], a builder that collects typed
//! key/value pairs (flat or one level nested) and renders them as compact or
//! pretty JSON.
//!
//! ## Quick start
//!
//! ```rust
//! use subcalc_core::JsonDocument;
//!
//! let mut doc = JsonDocument::new().unwrap();
//! doc.set("name", "John");
//! doc.set("scores", vec![95, 87, 92]);
//! assert_eq!(doc.serialize(false), r#"{"name":"John","scores":[95,87,92]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`builder`] — typed JSON document builder with nested-object handles
//! - [`types`] — `JsonValue` and the traits that decide which types can be stored
//! - [`config`] — TOML configuration loader
//! - [`calc`] — add, subtract, multiply, divide
//! - [`error`] — error types

pub mod builder;
pub mod calc;
pub mod config;
pub mod error;
pub mod types;

pub use builder::{JsonDocument, NestedHandle};
pub use calc::{Operation, Outcome};
pub use config::{load_config, ConfigRecord, PluginConfig};
pub use error::{CalcError, ConfigError, JsonError};
pub use types::{IntoJsonValue, JsonValue, ScalarValue};
