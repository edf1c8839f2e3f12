//! Environment-driven runtime configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// What to do with records that fail date or value parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorPolicy {
    /// Skip the record silently (default).
    Drop,
    /// Skip the record and log it at warn level.
    Warn,
}

impl ParseErrorPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drop" => Some(ParseErrorPolicy::Drop),
            "warn" => Some(ParseErrorPolicy::Warn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Input CSV path. `None` means read piped stdin.
    pub input_path: Option<PathBuf>,
    /// Zero-based column index of the order timestamp.
    pub date_column: usize,
    /// Zero-based column index of the order value.
    pub value_column: usize,
    /// Whether the first CSV row is a header.
    pub csv_has_header: bool,
    pub on_parse_error: ParseErrorPolicy,
    /// Per-date accumulator channel capacity.
    pub channel_buffer: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let on_parse_error = match env::var("ON_PARSE_ERROR") {
            Ok(raw) => ParseErrorPolicy::from_str(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(format!(
                    "ON_PARSE_ERROR must be 'drop' or 'warn', got '{}'",
                    raw
                ))
            })?,
            Err(_) => ParseErrorPolicy::Drop,
        };

        let channel_buffer: usize = parse_var("ROUTER_CHANNEL_BUFFER", 64)?;
        if channel_buffer == 0 {
            return Err(ConfigError::InvalidValue(
                "ROUTER_CHANNEL_BUFFER must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            input_path: env::var("ORDERS_CSV_PATH").ok().map(PathBuf::from),
            date_column: parse_var("ORDER_DATE_COLUMN", 6)?,
            value_column: parse_var("ORDER_VALUE_COLUMN", 5)?,
            csv_has_header: parse_var("CSV_HAS_HEADER", true)?,
            on_parse_error,
            channel_buffer,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{}: '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_policy_from_str() {
        assert_eq!(
            ParseErrorPolicy::from_str("drop"),
            Some(ParseErrorPolicy::Drop)
        );
        assert_eq!(
            ParseErrorPolicy::from_str("WARN"),
            Some(ParseErrorPolicy::Warn)
        );
        assert_eq!(ParseErrorPolicy::from_str("report"), None);
    }
}
