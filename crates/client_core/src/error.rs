use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url '{0}' cannot be used as a base for api routes")]
    CannotBeBase(String),
    #[error("transport failure during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("server rejected {operation} with status {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// The backend answered but refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}
