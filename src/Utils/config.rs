//! Settings of the demo binary, read from a TOML document.
//!
//! ```toml
//! loglevel = "debug"      # trace, debug, info, warn, error, off
//! log_to_file = false
//! example = 2
//! variables = ["x", "y"]
//!
//! [bindings]
//! x = 1.0
//! y = 2
//! ```
//! Every key is optional.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The file could not be read or created.
    Io { path: String, message: String },
    /// The document is not valid TOML.
    Parse(String),
    /// A key holds a value of the wrong type or outside its range.
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "cannot access '{}': {}", path, message),
            ConfigError::Parse(message) => write!(f, "invalid TOML: {}", message),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid value for '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub loglevel: Option<String>,
    pub log_to_file: bool,
    /// number of the example to run
    pub example: usize,
    /// variable values used when the examples evaluate expressions
    pub bindings: HashMap<String, f64>,
    pub variables: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            loglevel: Some("info".to_string()),
            log_to_file: false,
            example: 0,
            bindings: HashMap::from([("x".to_string(), 1.0), ("y".to_string(), 2.0)]),
            variables: vec!["x".to_string(), "y".to_string()],
        }
    }
}

/// Dotted key of the `key = value` line containing byte `offset`, with the
/// enclosing `[table]` header as prefix.
fn key_at(content: &str, offset: usize) -> String {
    let before = content.get(..offset).unwrap_or(content);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = content[line_start..].lines().next().unwrap_or("");
    let key = line.split('=').next().unwrap_or("").trim();
    let table = content[..line_start]
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| l.starts_with('[') && l.ends_with(']'))
        .map(|l| l.trim_matches(|c| c == '[' || c == ']').trim());
    match table {
        Some(table) => format!("{}.{}", table, key),
        None => key.to_string(),
    }
}

impl DemoConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        // syntax errors first, so type errors can be reported per key
        content
            .parse::<toml::Table>()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        toml::from_str::<DemoConfig>(content).map_err(|e| ConfigError::InvalidValue {
            key: e
                .span()
                .map(|span| key_at(content, span.start))
                .unwrap_or_default(),
            message: e.message().to_string(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Level name handed to the logger; a missing level means `info`.
    pub fn loglevel_str(&self) -> &str {
        self.loglevel.as_deref().unwrap_or("info")
    }

    /// Bindings as `(name, value)` pairs, sorted by name.
    pub fn binding_pairs(&self) -> Vec<(&str, f64)> {
        let mut pairs: Vec<(&str, f64)> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}
