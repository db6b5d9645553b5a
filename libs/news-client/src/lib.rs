mod client;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
mod response;

pub use client::Client;
pub use response::IntoResponse;

pub use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum NewsClientError {
    #[error("in reqwest crate: {}: {}", message, source)]
    ReqwestError {
        message: String,
        source: reqwest::Error,
    },

    #[error("failed status code {}: {}", status_code, message)]
    FailedStatusCode {
        status_code: StatusCode,
        message: String,
    },

    #[error("in serde_json crate: {}: {}", message, source)]
    SerdeJsonError {
        message: String,
        source: serde_json::Error,
    },

    #[error("{}", message)]
    Option { message: String },
}

impl NewsClientError {
    /// Status of a non-2xx response, if that is what failed.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            NewsClientError::FailedStatusCode { status_code, .. } => {
                Some(*status_code)
            }
            _ => None,
        }
    }
}
