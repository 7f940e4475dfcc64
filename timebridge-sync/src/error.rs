//! Error types for timebridge-sync.

use std::fmt;

use thiserror::Error;

use timebridge_core::ConversionError;

/// Which upstream API a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Toggl,
    Runn,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Toggl => write!(f, "toggl"),
            Service::Runn => write!(f, "runn"),
        }
    }
}

/// All errors that can arise from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Upstream answered with a non-success status; the body is kept verbatim.
    #[error("{service} {method} {url} returned {status}")]
    Http {
        service: Service,
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("{service} request to {url} failed: {source}")]
    Transport {
        service: Service,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A success response whose body did not have the expected shape.
    #[error("{service} response from {url} could not be decoded: {source}")]
    Decode {
        service: Service,
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// An HTTP client could not be constructed.
    #[error("failed to build {service} client: {source}")]
    Client {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    /// A configured base URL does not parse.
    #[error("invalid {service} base URL '{url}'")]
    BaseUrl { service: Service, url: String },

    /// A report total could not be turned into minutes.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// A submission task panicked or was cancelled.
    #[error("submission task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SyncError {
    /// Captured upstream body, when the failure carried one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            SyncError::Http { body, .. } | SyncError::Decode { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Upstream HTTP status, for [`SyncError::Http`] only.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
