//! Layered settings: an optional `projfields.*` file, then `PROJFIELDS_*`
//! environment variables (`__` separates nested keys, e.g.
//! `PROJFIELDS_LOCALE__CURRENCY_SYMBOL=€`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schedule to load when none is given on the command line.
    pub project_file: Option<PathBuf>,
    /// Where to write the report, if anywhere.
    pub output_file: Option<PathBuf>,
    /// Character set used when writing the report.
    pub encoding: String,
    /// Default `tracing` filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_file: None,
            output_file: None,
            encoding: "UTF8".to_string(),
            log_filter: "warn".to_string(),
            locale: Locale::default(),
        }
    }
}

impl Settings {
    /// Loads `projfields.{toml,json,yaml,...}` from the working directory when
    /// present, or the explicit `file` when given, then applies the environment.
    pub fn load(file: Option<&Path>) -> Result<Settings> {
        let builder = match file {
            Some(path) => Config::builder().add_source(File::from(path)),
            None => Config::builder().add_source(File::with_name("projfields").required(false)),
        };
        let settings: Settings = builder
            .add_source(Environment::with_prefix("PROJFIELDS").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()?;
        debug!(?settings, "loaded settings");
        Ok(settings)
    }
}

/// Presentation convention for rendered values. Defaults to US English.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub currency_symbol: String,
    /// Place the symbol after the amount (`1.234,50 €`) instead of before it.
    pub currency_suffix: bool,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// A `chrono` strftime pattern.
    pub date_format: String,
    pub true_text: String,
    pub false_text: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            currency_suffix: false,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            date_format: "%-m/%-d/%Y %-I:%M:%S %p".to_string(),
            true_text: "True".to_string(),
            false_text: "False".to_string(),
        }
    }
}
