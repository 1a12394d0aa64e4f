//! Error types for the REST-to-GraphQL gateway

use crate::types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure talking to the upstream GraphQL endpoint.
///
/// A reply that arrives with a 2xx status is never a transport error, even when
/// its body carries a GraphQL `errors` array.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The upstream answered with a non-2xx status
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The request never completed, or the reply was not JSON
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Main error type for the gateway
///
/// Every variant maps onto one JSON envelope and HTTP status, see
/// [`Error::status`] and [`Error::to_error_body`].
#[derive(Error, Debug)]
pub enum Error {
    /// A required request field was absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A caller-supplied value cannot be sent as an HTTP header
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Upstream transport errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Neither the standard nor the fallback mutation produced a cart id
    #[error("Failed to create cart")]
    CartNotCreated,

    /// The request could not be read (bad path encoding, oversized body)
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::Request(err))
    }
}

impl Error {
    /// HTTP status reported to the facade's caller
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingField(_) | Error::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            Error::Rejected { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert error to the JSON envelope returned by the facade
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            Error::MissingField(_)
            | Error::InvalidHeader(_)
            | Error::Rejected { .. }
            | Error::CartNotCreated => ErrorBody::new(self.to_string()),
            Error::Transport(err) => ErrorBody::new("API error").with_details(err.to_string()),
            _ => ErrorBody::new("Internal server error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::MissingField(_) | Error::InvalidHeader(_) | Error::Rejected { .. } => {
                tracing::debug!("Rejecting request: {}", self)
            }
            _ => tracing::error!("Request failed: {}", self),
        }
        (self.status(), Json(self.to_error_body())).into_response()
    }
}
