//! HTTP client for the plasmid inventory backend.

mod client;
mod error;
mod payload;

pub use client::{ApiClient, HealthStatus};
pub use error::ClientError;
pub use payload::{BagListing, SearchSummary, backend_error, parse_listing, parse_message, parse_search};
