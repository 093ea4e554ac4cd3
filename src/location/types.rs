//! Core types for the location subsystem.

use serde::Serialize;
use std::fmt;

/// Normalized geolocation record, shared by every provider.
///
/// A non-empty `error` is authoritative: the other fields are then empty
/// and must not be read as data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    pub ip: String,
    pub country_code: String,
    pub city: String,
    pub isp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl LocationRecord {
    /// A record carrying only a failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Why a single HTTP lookup or provider attempt failed.
#[derive(Debug)]
pub enum LookupError {
    /// DNS, connect, TLS or timeout.
    Network(String),
    /// Response arrived with a status other than 200.
    Status(u16),
    /// Body could not be read to completion.
    Body(String),
    /// Body was not the JSON shape the caller expected.
    Decode(String),
    /// Provider answered but said it could not resolve the address.
    Rejected { status: String, message: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Unexpected HTTP status: {}", code),
            Self::Body(msg) => write!(f, "Failed to read response body: {}", msg),
            Self::Decode(msg) => write!(f, "Invalid API response: {}", msg),
            Self::Rejected { status, message } => {
                write!(f, "Service returned status: {} - {}", status, message)
            }
        }
    }
}

impl std::error::Error for LookupError {}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
