//! Location lookup for a known IP address.
//!
//! Provides the provider adapters and the ordered fallback resolver.

pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::{default_providers, Provider};
pub use resolver::LocationResolver;
pub use types::{LocationRecord, LookupError};
