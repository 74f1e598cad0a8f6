//! Observable client state

use std::fmt;

use chrono::{DateTime, Utc};
use netcounter_api::{CounterValue, Endpoint};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Logical intents a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Refresh,
    Increment,
    Decrement,
}

impl Operation {
    /// Endpoint hit first by this operation
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Refresh => Endpoint::Count,
            Self::Increment => Endpoint::Add,
            Self::Decrement => Endpoint::Sub,
        }
    }

    /// Status shown while the operation's request is outstanding
    #[must_use]
    pub const fn in_progress(self) -> Status {
        match self {
            Self::Refresh => Status::Fetching,
            Self::Increment => Status::Incrementing,
            Self::Decrement => Status::Decrementing,
        }
    }

    /// Status shown once the operation has been confirmed
    #[must_use]
    pub const fn succeeded(self) -> Status {
        match self {
            Self::Refresh => Status::Updated,
            Self::Increment => Status::Incremented,
            Self::Decrement => Status::Decremented,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refresh => f.write_str("refresh"),
            Self::Increment => f.write_str("increment"),
            Self::Decrement => f.write_str("decrement"),
        }
    }
}

/// Outcome of the most recent operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Status {
    /// No operation attempted yet
    #[default]
    Idle,
    Fetching,
    Incrementing,
    Decrementing,
    Updated,
    Incremented,
    Decremented,
    /// Last operation failed; carries the failure description
    Error(String),
}

impl Status {
    /// Whether a request is outstanding
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Fetching | Self::Incrementing | Self::Decrementing
        )
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated | Self::Incremented | Self::Decremented)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Fetching => f.write_str("Fetching…"),
            Self::Incrementing => f.write_str("Incrementing…"),
            Self::Decrementing => f.write_str("Decrementing…"),
            Self::Updated => f.write_str("Updated"),
            Self::Incremented => f.write_str("Incremented"),
            Self::Decremented => f.write_str("Decremented"),
            Self::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// Snapshot of everything a hosting UI displays
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterState {
    /// Device address used by the most recent operation (or set by the user)
    pub address: String,
    /// Last value read from `/count`; `None` until the first successful refresh
    pub value: Option<CounterValue>,
    pub status: Status,
    /// When `value` was last read
    pub last_updated: Option<DateTime<Utc>>,
}

impl CounterState {
    /// Held value as a number, if one has been read
    ///
    /// # Errors
    /// Returns [`ClientError::Protocol`] when the device sent something other
    /// than a decimal integer.
    pub fn number(&self) -> Result<Option<i64>> {
        self.value
            .as_ref()
            .map(|value| value.parse().map_err(ClientError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Fetching.to_string(), "Fetching…");
        assert_eq!(Status::Updated.to_string(), "Updated");
        assert_eq!(Status::Incremented.to_string(), "Incremented");
        assert_eq!(
            Status::Error("connection refused".into()).to_string(),
            "Error: connection refused"
        );
    }

    #[test]
    fn test_operation_statuses() {
        for op in [Operation::Refresh, Operation::Increment, Operation::Decrement] {
            assert!(op.in_progress().is_in_flight());
            assert!(op.succeeded().is_success());
        }
        assert_eq!(Operation::Decrement.endpoint(), Endpoint::Sub);
    }

    #[test]
    fn test_default_state_has_no_value() {
        let state = CounterState::default();
        assert!(state.value.is_none());
        assert_eq!(state.status, Status::Idle);
        assert!(!state.status.is_error());
    }

    #[test]
    fn test_number_reports_protocol_errors() {
        let mut state = CounterState::default();
        assert_eq!(state.number().unwrap(), None);

        state.value = Some(CounterValue::from("12"));
        assert_eq!(state.number().unwrap(), Some(12));

        state.value = Some(CounterValue::from("twelve"));
        assert!(matches!(state.number(), Err(ClientError::Protocol(_))));
    }

    #[test]
    fn test_state_serializes_for_cli_output() {
        let state = CounterState {
            address: "192.168.0.223".into(),
            value: Some(CounterValue::from("1")),
            status: Status::Incremented,
            last_updated: None,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["value"], "1");
        assert_eq!(json["status"]["kind"], "incremented");
    }
}
