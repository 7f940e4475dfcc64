//! Connection settings. Every value comes from a flag or its environment
//! variable; credentials are never baked into the binary.

use std::time::Duration;

use clap::Args;

use timebridge_core::DEFAULT_REFERENCE_KEY;
use timebridge_sync::{
    RunnClient, RunnConfig, SyncError, TogglClient, TogglConfig, DEFAULT_RUNN_BASE_URL,
    DEFAULT_TOGGL_BASE_URL,
};

#[derive(Args, Debug, Clone)]
pub struct TogglArgs {
    /// Toggl Track API token.
    #[arg(long, env = "TOGGL_API_TOKEN", hide_env_values = true)]
    pub toggl_token: String,

    /// Toggl workspace to report on.
    #[arg(long, env = "TOGGL_WORKSPACE_ID")]
    pub toggl_workspace: String,

    /// Contact e-mail sent as the reports API `user_agent` parameter.
    #[arg(long, env = "TOGGL_USER_AGENT")]
    pub toggl_user_agent: String,

    #[arg(long, env = "TOGGL_BASE_URL", default_value = DEFAULT_TOGGL_BASE_URL)]
    pub toggl_url: String,
}

impl TogglArgs {
    pub fn client(&self, http: &HttpArgs) -> Result<TogglClient, SyncError> {
        TogglClient::new(
            TogglConfig {
                base_url: self.toggl_url.clone(),
                api_token: self.toggl_token.clone(),
                workspace_id: self.toggl_workspace.clone(),
                user_agent: self.toggl_user_agent.clone(),
            },
            http.timeout(),
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunnArgs {
    /// Runn API key (Bearer token).
    #[arg(long, env = "RUNN_API_KEY", hide_env_values = true)]
    pub runn_key: String,

    #[arg(long, env = "RUNN_BASE_URL", default_value = DEFAULT_RUNN_BASE_URL)]
    pub runn_url: String,

    /// Runn custom field that stores the Toggl id of a person or project.
    #[arg(long, env = "RUNN_REFERENCE_KEY", default_value = DEFAULT_REFERENCE_KEY)]
    pub reference_key: String,
}

impl RunnArgs {
    pub fn client(&self, http: &HttpArgs) -> Result<RunnClient, SyncError> {
        RunnClient::new(
            RunnConfig {
                base_url: self.runn_url.clone(),
                api_key: self.runn_key.clone(),
            },
            http.timeout(),
        )
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct HttpArgs {
    /// Per-request timeout in seconds. No timeout when unset.
    #[arg(long, env = "TIMEBRIDGE_HTTP_TIMEOUT_SECS", value_name = "SECS")]
    pub http_timeout_secs: Option<u64>,
}

impl HttpArgs {
    pub fn timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}
