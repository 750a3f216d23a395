//! Error types and response handling for both services.
//!
//! Every failure leaves the service as an empty-body response carrying the
//! mapped status; the error itself only goes to the log.

use std::net::AddrParseError;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::codec::CodecError;
use crate::error::RenderError;

/// Errors that can occur while binding or running a service.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Errors that can occur while answering a delivery request.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Render service answered with a non-success status
    #[error("Render service returned {status}")]
    Upstream { status: u16 },

    /// Render service could not be reached
    #[error("Connection to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Render service call exceeded the total timeout
    #[error("Render service timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Render service response body could not be read
    #[error("Failed to read render service body: {0}")]
    Body(reqwest::Error),

    /// HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// Wire text from the render service could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] CodecError),

    /// Decoded tree could not be serialized to HTML
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Import map could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configured client runtime file could not be read
    #[error("Failed to read client script '{path}': {source}")]
    ClientScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeliveryError {
    /// Map error variant to the HTTP status of the delivery response.
    ///
    /// A failing render service status is relayed; anything else is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeliveryError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            DeliveryError::Connection { .. }
            | DeliveryError::Timeout { .. }
            | DeliveryError::Body(_)
            | DeliveryError::Client(_)
            | DeliveryError::Decode(_)
            | DeliveryError::Render(_)
            | DeliveryError::Json(_)
            | DeliveryError::ClientScript { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Builder for bodiless error responses.
pub struct ErrorResponse;

impl ErrorResponse {
    pub fn empty(status: StatusCode) -> Response {
        status.into_response()
    }

    pub fn from_render(err: &RenderError) -> Response {
        Self::empty(
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
    }

    pub fn from_delivery(err: &DeliveryError) -> Response {
        Self::empty(err.status_code())
    }
}
