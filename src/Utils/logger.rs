use crate::taylor::taylor_errors::TaylorError;
use crate::taylor::taylor_series::Series;
use chrono::Local;
use csv::Writer;
use log::{info, warn};
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// "debug" | "info" | "warn" | "error" | "off"/"none"
pub fn parse_log_level(level: &str) -> Result<LevelFilter, TaylorError> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(TaylorError::Config(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        ))),
    }
}

/// Installs a terminal logger and, if asked, a second one writing to log_<date_time>.txt.
/// Returns whether the loggers were installed; a logger installed earlier in the process
/// stays in place and gets a warning.
pub fn init_logger(loglevel: Option<&str>, to_file: bool) -> Result<bool, TaylorError> {
    let level = match loglevel {
        Some(level) => parse_log_level(level)?,
        None => LevelFilter::Info,
    };
    if level == LevelFilter::Off {
        return Ok(false);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(level, Config::default(), File::create(name)?));
    }
    let logger_instance = CombinedLogger::init(loggers);
    match logger_instance {
        Ok(()) => {
            info!("Program started with loglevel: {}", level);
            Ok(true)
        }
        Err(e) => {
            warn!("logger already set, keeping it ({})", e);
            Ok(false)
        }
    }
}

/// Writes the per-order breakdown of a series, one row per term plus a total row.
pub fn save_series_to_csv<P: AsRef<Path>>(series: &Series, filename: P) -> Result<(), TaylorError> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "order",
        "derivative",
        "a",
        "value_at_a",
        "coefficient",
        "power_factor",
        "contribution",
    ])?;
    for term in series.terms() {
        writer.write_record([
            term.order.to_string(),
            term.derivative_text(),
            term.point.to_string(),
            term.value_at_point.to_string(),
            term.coefficient.to_string(),
            term.power_factor.to_string(),
            term.contribution.to_string(),
        ])?;
    }
    writer.write_record([
        "total".to_string(),
        String::new(),
        series.expansion_point().to_string(),
        String::new(),
        String::new(),
        String::new(),
        series.total().to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taylor::taylor_series::expand;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level(" Warn ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("none").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_log_level("verbose"),
            Err(TaylorError::Config(_))
        ));
    }

    #[test]
    fn test_second_logger_is_not_installed() {
        assert!(!init_logger(Some("off"), false).unwrap());
        let _ = init_logger(Some("error"), false);
        // one logger per process
        assert!(!init_logger(Some("error"), false).unwrap());
        assert!(init_logger(Some("loud"), false).is_err());
    }

    #[test]
    fn test_save_series_to_csv() {
        let series = expand("-0.5*x**5 + 3*x**2 + 2*x + 1", 5.0, 0.0, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.csv");
        save_series_to_csv(&series, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "order");
        assert_eq!(&headers[6], "contribution");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 7);
        assert_eq!(&rows[2][6], "75");
        assert_eq!(&rows[6][0], "total");
        assert_eq!(&rows[6][6], "-1476.5");
    }
}
