//! Output sink: plain text lines or a single JSON document.

use anyhow::{Context, Result};
use subcalc_core::{CalcError, ConfigRecord, JsonDocument, Operation, Outcome};

pub enum Report {
    Text,
    Json { doc: JsonDocument, pretty: bool },
}

impl Report {
    pub fn new(json: bool, pretty: bool) -> Result<Self> {
        if !json {
            return Ok(Report::Text);
        }
        let doc = JsonDocument::new().context("Failed to create JSON report")?;
        Ok(Report::Json { doc, pretty })
    }

    /// Record the outcome of one arithmetic subcommand.
    pub fn operation(&mut self, op: Operation, a: i64, b: i64, outcome: &Result<Outcome, CalcError>) {
        match self {
            Report::Text => match outcome {
                Ok(value) => println!("{} {} {} = {}", a, op.symbol(), b, value),
                Err(err) => println!("Error: {}", err),
            },
            Report::Json { doc, .. } => {
                doc.set("operation", op.name());
                doc.set("a", a);
                doc.set("b", b);
                match outcome {
                    Ok(Outcome::Integer(i)) => doc.set("result", *i),
                    Ok(Outcome::Float(x)) => doc.set("result", *x),
                    Err(err) => doc.set("error", err.to_string()),
                }
            }
        }
    }

    /// Record the loaded configuration.
    pub fn config(&mut self, conf: &ConfigRecord) -> Result<()> {
        match self {
            Report::Text => {
                println!("title: {}, value: {}", conf.title, conf.value);
                for (group, plugin) in conf.plugin_entries() {
                    println!("  {}: file={}, number={}", group, plugin.file, plugin.number);
                }
            }
            Report::Json { doc, .. } => {
                let nested = doc.create_nested("config");
                doc.set_nested(nested, "title", conf.title.as_str())?;
                // Values beyond i64 have no JSON integer form here; they become null.
                doc.set_nested(nested, "value", i64::try_from(conf.value).ok())?;
                doc.set_nested(nested, "plugins", i64::try_from(conf.plugin_count()).ok())?;
            }
        }
        Ok(())
    }

    /// Emit anything buffered. Text mode has already printed.
    pub fn finish(self) {
        if let Report::Json { doc, pretty } = self {
            println!("{}", doc.serialize(pretty));
        }
    }
}
