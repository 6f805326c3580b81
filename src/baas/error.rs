use thiserror::Error;

use crate::filter::FilterError;

/// Failure classes of a single BaaS call. Nothing is retried.
#[derive(Debug, Error)]
pub enum BaasError {
    #[error("connection failure: {0}")]
    Connection(String),

    #[error("upstream rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl From<reqwest::Error> for BaasError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BaasError::Decode(err.to_string())
        } else {
            BaasError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BaasError {
    fn from(err: serde_json::Error) -> Self {
        BaasError::Decode(err.to_string())
    }
}
