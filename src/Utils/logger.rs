use crate::Utils::config::ConfigError;
use chrono::Local;
use log::{LevelFilter, info, warn};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

/// Maps a level name to a filter. Accepts `trace`, `debug`, `info`, `warn`,
/// `error` and `off` (alias `none`), case-insensitive.
pub fn level_from_str(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(ConfigError::InvalidValue {
            key: "loglevel".to_string(),
            message: format!(
                "'{}' is not one of trace, debug, info, warn, error, off",
                other
            ),
        }),
    }
}

/// Name of the log file for a run started now: `log_<date>_<time>.txt`.
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs the global logger: terminal output, plus a timestamped file in the
/// working directory when `log_to_file` is set.
///
/// A level of `off` installs nothing. The global logger can only be set once
/// per process; later calls keep the first logger and return `Ok`.
pub fn init_logger(level: &str, log_to_file: bool) -> Result<(), ConfigError> {
    let log_option = level_from_str(level)?;
    if log_option == LevelFilter::Off {
        return Ok(());
    }

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let name = log_file_name();
        let file = File::create(&name).map_err(|e| ConfigError::Io {
            path: name.clone(),
            message: e.to_string(),
        })?;
        loggers.push(WriteLogger::new(log_option, Config::default(), file));
    }

    match CombinedLogger::init(loggers) {
        Ok(()) => {
            info!("logging at level {}", log_option);
            Ok(())
        }
        Err(_) => {
            warn!("logger already initialized, keeping the existing one");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_from_str("trace").unwrap(), LevelFilter::Trace);
        assert_eq!(level_from_str("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(level_from_str("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(level_from_str(" warn ").unwrap(), LevelFilter::Warn);
        assert_eq!(level_from_str("error").unwrap(), LevelFilter::Error);
        assert_eq!(level_from_str("none").unwrap(), LevelFilter::Off);
    }

    #[test]
    fn test_unknown_level() {
        match level_from_str("verbose") {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "loglevel"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_log_file_name() {
        let name = log_file_name();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_init_twice_is_tolerated() {
        assert!(init_logger("off", false).is_ok());
        assert!(init_logger("warn", false).is_ok());
        assert!(init_logger("error", false).is_ok());
        assert!(init_logger("shouting", false).is_err());
    }
}
