//! Runn planning API client.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use timebridge_core::{ActualRecord, TargetPerson, TargetProject};

use crate::error::{Service, SyncError};
use crate::http::{build_client, normalize_base, send_json};

pub const DEFAULT_RUNN_BASE_URL: &str = "https://app.runn.io/api";

#[derive(Debug, Clone)]
pub struct RunnConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct RunnClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RunnClient {
    pub fn new(config: RunnConfig, timeout: Option<Duration>) -> Result<Self, SyncError> {
        Ok(Self {
            client: build_client(Service::Runn, timeout)?,
            base_url: normalize_base(Service::Runn, &config.base_url)?,
            api_key: config.api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Full project directory. Runn returns it in one response.
    pub async fn projects(&self) -> Result<Vec<TargetProject>, SyncError> {
        let url = self.url("v0/projects");
        let request = self.client.get(&url).bearer_auth(&self.api_key);
        send_json(Service::Runn, "GET", &url, request).await
    }

    /// Full person directory.
    pub async fn people(&self) -> Result<Vec<TargetPerson>, SyncError> {
        let url = self.url("v0/people");
        let request = self.client.get(&url).bearer_auth(&self.api_key);
        send_json(Service::Runn, "GET", &url, request).await
    }

    /// Create one actual. There is no idempotency key: posting the same
    /// record twice creates two actuals.
    pub async fn post_actual(&self, record: &ActualRecord) -> Result<Value, SyncError> {
        let url = self.url("v0/actuals");
        let request = self.client.post(&url).bearer_auth(&self.api_key).json(record);
        send_json(Service::Runn, "POST", &url, request).await
    }
}
