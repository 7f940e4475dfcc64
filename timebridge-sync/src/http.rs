//! Shared request plumbing for the Toggl and Runn clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::{Service, SyncError};

/// Build a client; `None` keeps reqwest's default (no timeout).
pub(crate) fn build_client(service: Service, timeout: Option<Duration>) -> Result<Client, SyncError> {
    let mut builder = Client::builder().user_agent(concat!("timebridge/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|source| SyncError::Client { service, source })
}

/// Validate a base URL and strip any trailing slash so paths can be appended.
pub(crate) fn normalize_base(service: Service, base: &str) -> Result<String, SyncError> {
    let trimmed = base.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_owned()),
        _ => Err(SyncError::BaseUrl {
            service,
            url: base.to_owned(),
        }),
    }
}

/// Send `request` and decode a JSON body, capturing the raw body on failure.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: Service,
    method: &'static str,
    url: &str,
    request: RequestBuilder,
) -> Result<T, SyncError> {
    tracing::debug!(%service, method, url, "sending request");

    let transport = |source| SyncError::Transport {
        service,
        url: url.to_owned(),
        source,
    };
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    tracing::debug!(%service, method, url, status = status.as_u16(), bytes = body.len(), "received response");

    if !status.is_success() {
        return Err(SyncError::Http {
            service,
            method,
            url: url.to_owned(),
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| SyncError::Decode {
        service,
        url: url.to_owned(),
        body,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_strips_trailing_slash() {
        assert_eq!(
            normalize_base(Service::Runn, "https://app.runn.io/api/").unwrap(),
            "https://app.runn.io/api"
        );
    }

    #[test]
    fn normalize_base_rejects_non_http() {
        let err = normalize_base(Service::Toggl, "ftp://example.com").unwrap_err();
        assert!(matches!(err, SyncError::BaseUrl { service: Service::Toggl, .. }));
        assert!(normalize_base(Service::Toggl, "not a url").is_err());
    }
}
