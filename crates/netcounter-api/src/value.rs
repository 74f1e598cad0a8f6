//! Raw counter value as reported by `/count`

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from interpreting a counter payload as a number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Device returned an empty body
    #[error("empty counter payload")]
    Empty,

    /// Body is not a decimal integer
    #[error("counter payload is not an integer: {0:?}")]
    NotAnInteger(String),
}

/// Last observed counter value, kept as the text the device sent
///
/// Numeric validation is deferred to whoever displays the value; see
/// [`CounterValue::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterValue(String);

impl CounterValue {
    /// Wrap a raw payload
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw text exactly as received
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the payload as a signed integer
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`ValueError`] when the payload is empty or not a decimal integer.
    pub fn parse(&self) -> Result<i64, ValueError> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        trimmed
            .parse()
            .map_err(|_| ValueError::NotAnInteger(self.0.clone()))
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CounterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CounterValue {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CounterValue {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(CounterValue::from("5").parse(), Ok(5));
        assert_eq!(CounterValue::from("-12").parse(), Ok(-12));
        assert_eq!(CounterValue::from(" 42\n").parse(), Ok(42));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CounterValue::from("").parse(), Err(ValueError::Empty));
        assert_eq!(CounterValue::from("  ").parse(), Err(ValueError::Empty));
    }

    #[test]
    fn test_parse_garbage_keeps_raw_text() {
        let value = CounterValue::from("Added. New count: 3");
        assert_eq!(
            value.parse(),
            Err(ValueError::NotAnInteger("Added. New count: 3".to_string()))
        );
        assert_eq!(value.as_str(), "Added. New count: 3");
    }

    #[test]
    fn test_display_is_raw() {
        assert_eq!(CounterValue::from(" 7 ").to_string(), " 7 ");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&CounterValue::from("9")).unwrap();
        assert_eq!(json, r#""9""#);
    }
}
