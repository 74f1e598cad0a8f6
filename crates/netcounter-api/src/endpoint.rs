//! Device endpoints

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method used by a device endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Endpoints exposed by a counter device
///
/// No headers, authentication, or request body are sent to any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Read the current counter value (body is the decimal value)
    Count,
    /// Increment the counter by the device-defined step
    Add,
    /// Decrement the counter by the device-defined step
    Sub,
}

impl Endpoint {
    /// All endpoints, in contract order
    pub const ALL: [Endpoint; 3] = [Endpoint::Count, Endpoint::Add, Endpoint::Sub];

    /// Request path, relative to the device root
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Count => "/count",
            Self::Add => "/add",
            Self::Sub => "/sub",
        }
    }

    /// HTTP method for this endpoint
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Count => HttpMethod::Get,
            Self::Add | Self::Sub => HttpMethod::Post,
        }
    }

    /// Whether calling this endpoint changes the device counter
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Count.path(), "/count");
        assert_eq!(Endpoint::Add.path(), "/add");
        assert_eq!(Endpoint::Sub.path(), "/sub");
    }

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::Count.method(), HttpMethod::Get);
        assert_eq!(Endpoint::Add.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Sub.method(), HttpMethod::Post);
    }

    #[test]
    fn test_only_add_and_sub_mutate() {
        let mutations: Vec<_> = Endpoint::ALL
            .into_iter()
            .filter(|e| e.is_mutation())
            .collect();
        assert_eq!(mutations, vec![Endpoint::Add, Endpoint::Sub]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::Count.to_string(), "GET /count");
        assert_eq!(Endpoint::Sub.to_string(), "POST /sub");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Endpoint::Add).unwrap();
        assert_eq!(json, r#""add""#);
        let method: HttpMethod = serde_json::from_str(r#""POST""#).unwrap();
        assert_eq!(method, HttpMethod::Post);
    }
}
