//! Discovery of the caller's public IP address via ipify.

use crate::http::Fetch;
use crate::location::LookupError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Sentinel meaning "no IP address could be determined".
pub const UNAVAILABLE: &str = "N/A";

pub const IPIFY_URL: &str = "https://api.ipify.org?format=json";
pub const EXTERNAL_IP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// Returns the public IP as reported by the service, or [`UNAVAILABLE`].
/// The address is passed through unvalidated.
pub fn resolve_external_ip(fetcher: &dyn Fetch) -> String {
    match fetch_ip(fetcher) {
        Ok(ip) => {
            debug!(%ip, "external IP resolved");
            ip
        }
        Err(e) => {
            warn!(error = %e, "external IP lookup failed");
            UNAVAILABLE.to_string()
        }
    }
}

fn fetch_ip(fetcher: &dyn Fetch) -> Result<String, LookupError> {
    let body = fetcher.get(IPIFY_URL, EXTERNAL_IP_TIMEOUT)?;
    let r: IpifyResponse = serde_json::from_slice(&body)?;
    Ok(r.ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::{Reply, StubFetch};

    fn resolve_with(reply: Reply) -> String {
        let stub = StubFetch::new().route("ipify", reply);
        resolve_external_ip(&stub)
    }

    #[test]
    fn test_valid_response() {
        assert_eq!(resolve_with(Reply::Body(r#"{"ip":"203.0.113.7"}"#)), "203.0.113.7");
    }

    #[test]
    fn test_timeout_or_network_error() {
        assert_eq!(resolve_with(Reply::Network), UNAVAILABLE);
    }

    #[test]
    fn test_server_error() {
        assert_eq!(resolve_with(Reply::Status(500)), UNAVAILABLE);
    }

    #[test]
    fn test_invalid_json() {
        assert_eq!(resolve_with(Reply::Body("203.0.113.7")), UNAVAILABLE);
    }

    #[test]
    fn test_missing_ip_key() {
        assert_eq!(resolve_with(Reply::Body(r#"{"addr":"203.0.113.7"}"#)), UNAVAILABLE);
    }

    #[test]
    fn test_unvalidated_passthrough() {
        assert_eq!(resolve_with(Reply::Body(r#"{"ip":"not-an-ip"}"#)), "not-an-ip");
    }

    #[test]
    fn test_single_request_with_short_timeout() {
        let stub = StubFetch::new().route("ipify", Reply::Body(r#"{"ip":"203.0.113.7"}"#));
        resolve_external_ip(&stub);
        assert_eq!(stub.calls(), vec![IPIFY_URL]);
        assert_eq!(stub.timeouts(), vec![EXTERNAL_IP_TIMEOUT]);
    }
}
