//! Geolocation provider adapters.
//!
//! Each provider knows its own URL and response schema and normalizes the
//! body into a [`LocationRecord`]. The resolver tries them in list order.

use super::types::{LocationRecord, LookupError};
use serde::Deserialize;

/// A third-party service that maps an IP address to location metadata.
pub trait Provider {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;

    fn url(&self, ip: &str) -> String;

    /// Validate the provider's own success signal and map its fields.
    fn parse(&self, body: &[u8]) -> Result<LocationRecord, LookupError>;
}

/// Providers in priority order: earlier entries win whenever they succeed.
pub fn default_providers() -> Vec<Box<dyn Provider>> {
    vec![Box::new(IpApi), Box::new(IpInfo)]
}

// ─── ip-api.com ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResult {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    country_code: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    isp: String,
    #[serde(default)]
    query: String,
}

/// ip-api.com, which reports `status: "success"` or `"fail"` in the body.
pub struct IpApi;

impl Provider for IpApi {
    fn name(&self) -> &'static str {
        "ip-api.com"
    }

    fn url(&self, ip: &str) -> String {
        format!(
            "http://ip-api.com/json/{}?fields=status,message,countryCode,city,isp,query",
            ip
        )
    }

    fn parse(&self, body: &[u8]) -> Result<LocationRecord, LookupError> {
        let r: IpApiResult = serde_json::from_slice(body)?;
        if r.status != "success" {
            return Err(LookupError::Rejected {
                status: r.status,
                message: r.message,
            });
        }
        Ok(LocationRecord {
            ip: r.query,
            country_code: r.country_code,
            city: r.city,
            isp: r.isp,
            error: String::new(),
        })
    }
}

// ─── ipinfo.io ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct IpInfoResult {
    #[serde(default)]
    ip: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    org: String,
}

/// ipinfo.io. Has no status field, so any well-formed object is a success.
pub struct IpInfo;

impl Provider for IpInfo {
    fn name(&self) -> &'static str {
        "ipinfo.io"
    }

    fn url(&self, ip: &str) -> String {
        format!("https://ipinfo.io/{}/json", ip)
    }

    fn parse(&self, body: &[u8]) -> Result<LocationRecord, LookupError> {
        let r: IpInfoResult = serde_json::from_slice(body)?;
        Ok(LocationRecord {
            ip: r.ip,
            country_code: r.country,
            city: r.city,
            isp: r.org,
            error: String::new(),
        })
    }
}
