//! Toggl Track reports client.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;

use timebridge_core::WeeklyReport;

use crate::error::{Service, SyncError};
use crate::http::{build_client, normalize_base, send_json};

pub const DEFAULT_TOGGL_BASE_URL: &str = "https://api.track.toggl.com";

/// Toggl expects this literal as the basic-auth password for token auth.
const TOKEN_PASSWORD: &str = "api_token";

/// Connection settings for the Toggl reports API.
#[derive(Debug, Clone)]
pub struct TogglConfig {
    pub base_url: String,
    pub api_token: String,
    pub workspace_id: String,
    /// Contact address Toggl asks report consumers to identify with.
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct TogglClient {
    client: Client,
    base_url: String,
    api_token: String,
    workspace_id: String,
    user_agent: String,
}

impl TogglClient {
    pub fn new(config: TogglConfig, timeout: Option<Duration>) -> Result<Self, SyncError> {
        Ok(Self {
            client: build_client(Service::Toggl, timeout)?,
            base_url: normalize_base(Service::Toggl, &config.base_url)?,
            api_token: config.api_token,
            workspace_id: config.workspace_id,
            user_agent: config.user_agent,
        })
    }

    /// Weekly report for the single-day window `date..=date`.
    pub async fn weekly_report(&self, date: NaiveDate) -> Result<WeeklyReport, SyncError> {
        let url = format!("{}/reports/api/v2/weekly", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();
        let request = self
            .client
            .get(&url)
            .basic_auth(&self.api_token, Some(TOKEN_PASSWORD))
            .query(&[
                ("user_agent", self.user_agent.as_str()),
                ("workspace_id", self.workspace_id.as_str()),
                ("since", day.as_str()),
                ("until", day.as_str()),
            ]);

        let report: WeeklyReport = send_json(Service::Toggl, "GET", &url, request).await?;
        tracing::debug!(date = %day, entries = report.data.len(), "fetched weekly report");
        Ok(report)
    }
}
