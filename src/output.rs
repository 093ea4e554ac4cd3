//! Assembles the final JSON document written to stdout.

use crate::external_ip::UNAVAILABLE;
use crate::location::{LocationRecord, LocationResolver};
use serde::Serialize;
use tracing::warn;

pub const NO_EXTERNAL_IP_ERROR: &str = "No external IP detected.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEnvelope {
    pub ip: String,
    #[serde(rename = "full_data")]
    pub full: LocationRecord,
}

impl OutputEnvelope {
    /// Single-line JSON document.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({
                "ip": self.ip,
                "full_data": { "error": format!("Failed to serialize output: {}", e) },
            })
            .to_string()
        })
    }
}

/// Combine the resolved IP with its location. The resolver is not consulted
/// at all when the IP is the sentinel.
pub fn build_output(ip: String, resolver: &LocationResolver<'_>) -> OutputEnvelope {
    let full = if ip == UNAVAILABLE {
        LocationRecord::failed(NO_EXTERNAL_IP_ERROR)
    } else {
        resolver.resolve(&ip)
    };
    if full.is_error() {
        warn!(%ip, error = %full.error, "no location data");
    }
    OutputEnvelope { ip, full }
}
