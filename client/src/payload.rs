//! Request bodies and response parsing for the plasmid backend.
//!
//! Everything here is pure so it can be tested without a server.

use crate::error::ClientError;
use plasmid_core::{PlasmidRecord, RecordPayload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records grouped by bag name, the backend's listing shape.
pub type BagListing = BTreeMap<String, Vec<PlasmidRecord>>;

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub user_input: &'a str,
}

/// A single record is sent as an object, several as an array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum AddRequest {
    One(RecordPayload),
    Many(Vec<RecordPayload>),
}

#[derive(Debug, Serialize)]
pub(crate) struct ModifyRequest {
    pub updated: RecordPayload,
    pub previous: RecordPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckOutRequest<'a> {
    pub record: RecordPayload,
    pub sample_index: usize,
    pub checked_out_by: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckInRequest {
    pub record: RecordPayload,
    pub sample_index: usize,
}

/// What the backend found for a search.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchSummary {
    /// `"found/requested"`, when the backend reports it.
    #[serde(default)]
    pub found: Option<String>,
    #[serde(default)]
    pub bags: BagListing,
    /// Requested ids the backend does not know.
    #[serde(default)]
    pub not_found: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DataResponse {
    data: Option<BagListing>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    summary: Option<SearchSummary>,
    #[serde(alias = "result")]
    results: Option<Vec<PlasmidRecord>>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageResponse {
    message: Option<String>,
    error: Option<String>,
}

/// Refuses records that may not be persisted.
pub(crate) fn require_valid(record: &PlasmidRecord) -> Result<(), ClientError> {
    let errors = record.validation_errors();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClientError::InvalidRecord {
            full_id: record.full_id(),
            errors,
        })
    }
}

pub(crate) fn add_request(records: &[PlasmidRecord]) -> Result<AddRequest, ClientError> {
    for record in records {
        require_valid(record)?;
    }
    match records {
        [] => Err(ClientError::NothingToSend),
        [record] => Ok(AddRequest::One(record.to_api_payload())),
        many => Ok(AddRequest::Many(
            many.iter().map(PlasmidRecord::to_api_payload).collect(),
        )),
    }
}

pub(crate) fn modify_request(
    updated: &PlasmidRecord,
    previous: &PlasmidRecord,
) -> Result<ModifyRequest, ClientError> {
    require_valid(updated)?;
    Ok(ModifyRequest {
        updated: updated.to_api_payload(),
        previous: previous.to_api_payload(),
    })
}

/// Records listed without a bag take the bag they are listed under.
fn fill_bags(listing: BagListing) -> BagListing {
    listing
        .into_iter()
        .map(|(bag, records)| {
            let records = records
                .into_iter()
                .map(|record| {
                    if record.bag().is_empty() {
                        record.with_bag(bag.clone())
                    } else {
                        record
                    }
                })
                .collect();
            (bag, records)
        })
        .collect()
}

fn group_by_bag(records: Vec<PlasmidRecord>) -> BagListing {
    let mut listing = BagListing::new();
    for record in records {
        listing
            .entry(record.bag().to_string())
            .or_default()
            .push(record);
    }
    listing
}

/// Reads the `data` listing of `/api/bags` and `/api/getCheckedOut`.
pub fn parse_listing(body: &str) -> Result<BagListing, ClientError> {
    let response: DataResponse = serde_json::from_str(body)?;
    response
        .data
        .map(fill_bags)
        .ok_or(ClientError::MissingData("data"))
}

/// Reads a search response: the summary when present, otherwise the flat
/// result list grouped by bag.
pub fn parse_search(body: &str) -> Result<SearchSummary, ClientError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    match (response.summary, response.results) {
        (Some(summary), _) => Ok(SearchSummary {
            bags: fill_bags(summary.bags),
            ..summary
        }),
        (None, Some(results)) => Ok(SearchSummary {
            bags: group_by_bag(results),
            ..SearchSummary::default()
        }),
        (None, None) => Err(ClientError::MissingData("summary")),
    }
}

/// The `message` of a successful mutation, empty when absent.
pub fn parse_message(body: &str) -> String {
    serde_json::from_str::<MessageResponse>(body)
        .ok()
        .and_then(|response| response.message)
        .unwrap_or_default()
}

/// Builds the error for a non-success response, preferring the backend's
/// own `error` text.
pub fn backend_error(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<MessageResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .filter(|error| !error.trim().is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                "request failed".to_string()
            } else {
                body.to_string()
            }
        });
    ClientError::Backend { status, message }
}

#[cfg(test)]
mod tests;
