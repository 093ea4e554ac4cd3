//! Location resolver: walks the provider fallback chain.
//!
//! Flow: provider 1 → provider 2 → ... → "all unavailable" record.
//! Each provider is attempted exactly once; the first success wins.

use super::providers::{self, Provider};
use super::types::{LocationRecord, LookupError};
use crate::external_ip::UNAVAILABLE;
use crate::http::Fetch;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

pub const INVALID_IP_ERROR: &str = "Cannot get full location data for 'N/A' or empty IP address.";
pub const ALL_UNAVAILABLE_ERROR: &str = "All full IP data services are unavailable.";

/// The location resolver with its ordered provider list.
pub struct LocationResolver<'a> {
    fetcher: &'a dyn Fetch,
    providers: Vec<Box<dyn Provider>>,
}

impl<'a> LocationResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self::with_providers(fetcher, providers::default_providers())
    }

    /// Create a resolver with a specific provider list (for testing).
    pub fn with_providers(fetcher: &'a dyn Fetch, providers: Vec<Box<dyn Provider>>) -> Self {
        Self { fetcher, providers }
    }

    /// Resolve `ip` through the fallback chain. Never fails: problems end up
    /// in the record's `error` field.
    pub fn resolve(&self, ip: &str) -> LocationRecord {
        if ip.is_empty() || ip == UNAVAILABLE {
            return LocationRecord::failed(INVALID_IP_ERROR);
        }

        for provider in &self.providers {
            match self.try_provider(provider.as_ref(), ip) {
                Ok(loc) => {
                    info!(provider = provider.name(), "location resolved");
                    return loc;
                }
                Err(e) => warn!(provider = provider.name(), error = %e, "provider skipped"),
            }
        }

        LocationRecord::failed(ALL_UNAVAILABLE_ERROR)
    }

    fn try_provider(&self, provider: &dyn Provider, ip: &str) -> Result<LocationRecord, LookupError> {
        let url = provider.url(ip);
        debug!(provider = provider.name(), %url, "querying provider");
        let body = self.fetcher.get(&url, LOCATION_TIMEOUT)?;
        provider.parse(&body)
    }
}
