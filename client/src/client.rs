use crate::error::ClientError;
use crate::payload::{
    BagListing, CheckInRequest, CheckOutRequest, SearchRequest, SearchSummary, add_request,
    backend_error, modify_request, parse_listing, parse_message, parse_search,
};
use plasmid_core::PlasmidRecord;
use plasmid_core::types::ApiConfig;
use reqwest::blocking::{Client, RequestBuilder};
use std::fmt;

/// Reachability of the backend or its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Connected,
    Disconnected(String),
}

impl HealthStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, HealthStatus::Connected)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Connected => write!(f, "connected"),
            HealthStatus::Disconnected(reason) => write!(f, "disconnected ({reason})"),
        }
    }
}

/// Blocking client for the plasmid backend's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and returns the body of a successful response.
    fn send(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::Connect {
                    base_url: self.base_url.clone(),
                    source: e,
                }
            } else {
                ClientError::Http(e)
            }
        })?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            log::debug!("backend answered {status}: {}", body.trim());
            return Err(backend_error(status.as_u16(), &body));
        }
        Ok(body)
    }

    fn probe(&self, path: &str, what: &str) -> HealthStatus {
        match self.http.get(self.url(path)).send() {
            Ok(response) if response.status().is_success() => HealthStatus::Connected,
            Ok(response) => HealthStatus::Disconnected(format!(
                "{what} returned {}",
                response.status().as_u16()
            )),
            Err(e) => HealthStatus::Disconnected(e.to_string()),
        }
    }
}

/// Health checks. These never fail; an unreachable backend is a status.
impl ApiClient {
    pub fn health(&self) -> HealthStatus {
        self.probe("/health", "API")
    }

    pub fn database_health(&self) -> HealthStatus {
        self.probe("/health/database", "Database health check")
    }
}

/// Record operations.
impl ApiClient {
    /// Every record, grouped by bag.
    pub fn fetch_all_bags(&self) -> Result<BagListing, ClientError> {
        log::debug!("fetching all bags");
        let body = self.send(self.http.get(self.url("/api/bags")))?;
        parse_listing(&body)
    }

    /// Server-side search by ids, lots or bag.
    pub fn search(&self, input: &str) -> Result<SearchSummary, ClientError> {
        let request = SearchRequest {
            user_input: input.trim(),
        };
        log::debug!("searching backend for '{}'", request.user_input);
        let body = self.send(self.http.post(self.url("/api/search")).json(&request))?;
        parse_search(&body)
    }

    /// Saves new records. Every record must be valid.
    pub fn add(&self, records: &[PlasmidRecord]) -> Result<String, ClientError> {
        let request = add_request(records)?;
        log::debug!("adding {} records", records.len());
        let body = self.send(self.http.post(self.url("/api/add")).json(&request))?;
        Ok(parse_message(&body))
    }

    /// Replaces `previous` with `updated`, which must be valid.
    pub fn modify(
        &self,
        updated: &PlasmidRecord,
        previous: &PlasmidRecord,
    ) -> Result<String, ClientError> {
        let request = modify_request(updated, previous)?;
        log::debug!("modifying record {}", previous.full_id());
        let body = self.send(self.http.put(self.url("/api/modify")).json(&request))?;
        Ok(parse_message(&body))
    }

    pub fn delete(&self, record: &PlasmidRecord) -> Result<String, ClientError> {
        log::debug!("deleting record {}", record.full_id());
        let body = self.send(
            self.http
                .delete(self.url("/api/delete"))
                .json(&record.to_api_payload()),
        )?;
        Ok(parse_message(&body))
    }

    pub fn check_out(
        &self,
        record: &PlasmidRecord,
        sample_index: usize,
        user: &str,
    ) -> Result<String, ClientError> {
        let request = CheckOutRequest {
            record: record.to_api_payload(),
            sample_index,
            checked_out_by: user,
        };
        log::debug!("checking out sample {sample_index} of {}", record.full_id());
        let body = self.send(self.http.post(self.url("/api/checkout")).json(&request))?;
        Ok(parse_message(&body))
    }

    pub fn check_in(
        &self,
        record: &PlasmidRecord,
        sample_index: usize,
    ) -> Result<String, ClientError> {
        let request = CheckInRequest {
            record: record.to_api_payload(),
            sample_index,
        };
        log::debug!("checking in sample {sample_index} of {}", record.full_id());
        let body = self.send(self.http.post(self.url("/api/checkin")).json(&request))?;
        Ok(parse_message(&body))
    }

    /// Records with at least one sample checked out, grouped by bag.
    pub fn checked_out(&self) -> Result<BagListing, ClientError> {
        let body = self.send(self.http.get(self.url("/api/getCheckedOut")))?;
        parse_listing(&body)
    }
}
