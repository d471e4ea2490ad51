use plasmid_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(
        "cannot connect to server at {base_url}. Check that the backend is running and accessible."
    )]
    Connect {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("invalid JSON from backend: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend response has no '{0}' field")]
    MissingData(&'static str),

    #[error("record {full_id} is not valid: {}", join(.errors))]
    InvalidRecord {
        full_id: String,
        errors: Vec<ValidationError>,
    },

    #[error("no records to send")]
    NothingToSend,
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
