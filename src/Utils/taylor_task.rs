use crate::Utils::logger::{init_logger, save_series_to_csv};
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_as};
use crate::taylor::expansion_config::ExpansionConfig;
use crate::taylor::taylor_errors::TaylorError;
use crate::taylor::taylor_series::{Series, expand_with_config};
use log::info;
use std::path::Path;

/// One expansion read from a task document:
/// ```text
/// expansion
///  expression: -0.5*x**5 + 3*x**2 + 2*x + 1
///  x: 5
///  a: 0
///  degree: 5
/// settings
///  transcendental_degree: 15
///  variable: x
///  loglevel: info
///  logfile: true
///  csv: terms.csv
/// ```
/// `expression` and `x` are required.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorTask {
    pub expression: String,
    pub x: f64,
    pub a: f64,
    pub degree: Option<usize>,
    pub config: ExpansionConfig,
    pub loglevel: Option<String>,
    pub logfile: bool,
    pub csv: Option<String>,
}

fn first_value<'a>(document: &'a DocumentMap, section: &str, key: &str) -> Option<&'a Value> {
    document
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|values| values.as_ref())
        .and_then(|values| values.first())
}

fn float_value(document: &DocumentMap, section: &str, key: &str) -> Result<Option<f64>, TaylorError> {
    match first_value(document, section, key) {
        None => Ok(None),
        Some(value) => value.as_float().map(Some).ok_or_else(|| {
            TaylorError::Config(format!("{}.{} must be a number, got '{}'", section, key, value))
        }),
    }
}

fn count_value(document: &DocumentMap, section: &str, key: &str) -> Result<Option<usize>, TaylorError> {
    match first_value(document, section, key) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| {
                TaylorError::Config(format!(
                    "{}.{} must be a non-negative integer, got '{}'",
                    section, key, value
                ))
            }),
    }
}

impl TaylorTask {
    pub fn from_document(document: &DocumentMap) -> Result<Self, TaylorError> {
        let expression = first_value(document, "expansion", "expression")
            .map(|v| v.to_string_value())
            .ok_or_else(|| TaylorError::Config("expansion.expression is required".to_string()))?;
        let x = float_value(document, "expansion", "x")?
            .ok_or_else(|| TaylorError::Config("expansion.x is required".to_string()))?;
        let a = float_value(document, "expansion", "a")?.unwrap_or(0.0);
        let degree = count_value(document, "expansion", "degree")?;

        let mut config = ExpansionConfig::default();
        if let Some(degree) = count_value(document, "settings", "transcendental_degree")? {
            config.transcendental_degree = degree;
        }
        if let Some(variable) = first_value(document, "settings", "variable") {
            config.canonical_variable = variable.to_string_value();
        }
        let loglevel = first_value(document, "settings", "loglevel").map(|v| v.to_string_value());
        let logfile = match first_value(document, "settings", "logfile") {
            None => false,
            Some(value) => value.as_boolean().ok_or_else(|| {
                TaylorError::Config(format!("settings.logfile must be true or false, got '{}'", value))
            })?,
        };
        let csv = first_value(document, "settings", "csv").map(|v| v.to_string_value());

        Ok(TaylorTask {
            expression,
            x,
            a,
            degree,
            config,
            loglevel,
            logfile,
            csv,
        })
    }

    pub fn from_text(text: &str) -> Result<Self, TaylorError> {
        let document = parse_document_as(text).map_err(TaylorError::Config)?;
        Self::from_document(&document)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaylorError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Expands, and writes the breakdown to the csv file when one is configured.
    pub fn run(&self) -> Result<Series, TaylorError> {
        let series = expand_with_config(&self.expression, self.x, self.a, self.degree, &self.config)?;
        if let Some(csv) = &self.csv {
            save_series_to_csv(&series, csv)?;
            info!("terms saved to {}", csv);
        }
        Ok(series)
    }

    /// Installs the configured logger, then runs.
    pub fn run_with_logging(&self) -> Result<Series, TaylorError> {
        init_logger(self.loglevel.as_deref(), self.logfile)?;
        let series = self.run();
        info!("Program ended");
        series
    }
}
