//! Order normalization from raw CSV fields to a validated Order struct

use chrono::NaiveDateTime;

/// Expected timestamp format of the raw order date field.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical calendar-date form used as the aggregation key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// The monetary value of an order on a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Canonical `"YYYY-MM-DD"` date key, time-of-day truncated.
    pub date: String,
    pub value: f64,
}

#[derive(Debug)]
pub enum ParseError {
    InvalidDate(String),
    InvalidValue(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidDate(raw) => write!(f, "unparseable order date: '{}'", raw),
            ParseError::InvalidValue(raw) => write!(f, "unparseable order value: '{}'", raw),
        }
    }
}

impl std::error::Error for ParseError {}

impl Order {
    /// Parse an Order from raw date and value strings.
    ///
    /// The timestamp must match [`DATE_TIME_FORMAT`]; whatever time-of-day it
    /// carries is discarded and only the calendar date is kept.
    pub fn parse(raw_date: &str, raw_value: &str) -> Result<Self, ParseError> {
        let timestamp = NaiveDateTime::parse_from_str(raw_date, DATE_TIME_FORMAT)
            .map_err(|_| ParseError::InvalidDate(raw_date.to_string()))?;
        let value: f64 = raw_value
            .parse()
            .map_err(|_| ParseError::InvalidValue(raw_value.to_string()))?;
        Ok(Self {
            date: timestamp.date().format(DATE_KEY_FORMAT).to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_truncates_time_of_day() {
        let order = Order::parse("2015-06-01 00:27:24", "121.2").unwrap();
        assert_eq!(
            order,
            Order {
                date: "2015-06-01".to_string(),
                value: 121.2,
            }
        );

        let order = Order::parse("2017-03-01 10:12:34", "127.2").unwrap();
        assert_eq!(
            order,
            Order {
                date: "2017-03-01".to_string(),
                value: 127.2,
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Order::parse("2015-06-01", "121.2").is_err());
        assert!(Order::parse("01/06/2015 00:27:24", "121.2").is_err());
        assert!(Order::parse("not a date", "121.2").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_value() {
        let err = Order::parse("2015-06-01 00:27:24", "12f.2").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue(_)));
        assert!(Order::parse("2015-06-01 00:27:24", "").is_err());
    }
}
