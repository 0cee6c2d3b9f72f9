use std::time::Duration;

use anyhow::Context;
use civicdesk_core::config::AppConfig;
use civicdesk_core::types::SessionToken;
use civicdesk_providers::intake_api::{
    IntakeApiConfig, build_chat_request, build_health_request, build_reset_request,
};
use civicdesk_providers::parse::{ensure_success, parse_chat_reply, parse_health};
use civicdesk_providers::runtime::{ClientOptions, build_client, execute};

/// `RemoteChat` over the intake service's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpIntakeRemote {
    api: IntakeApiConfig,
    client: reqwest::Client,
}

impl HttpIntakeRemote {
    pub fn new(base_url: impl Into<String>, opts: ClientOptions) -> anyhow::Result<Self> {
        Ok(Self {
            api: IntakeApiConfig {
                base_url: base_url.into(),
            },
            client: build_client(opts)?,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let opts = ClientOptions {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.request_timeout_secs.map(Duration::from_secs),
        };
        Self::new(cfg.api_base_url.clone(), opts)
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Returns the service's reported status (`"ok"` when healthy).
    pub async fn health(&self) -> anyhow::Result<String> {
        let req = build_health_request(&self.api);
        let resp = execute(&self.client, &req).await?;
        ensure_success(&resp)?;
        Ok(parse_health(&resp.body)?.status)
    }
}

#[async_trait::async_trait]
impl civicdesk_engine::traits::RemoteChat for HttpIntakeRemote {
    async fn send(&self, message: &str, session: &SessionToken) -> anyhow::Result<String> {
        let req = build_chat_request(&self.api, message, session.as_str());
        let resp = execute(&self.client, &req).await?;
        ensure_success(&resp).context("chat request")?;
        parse_chat_reply(&resp.body)
    }

    async fn reset(&self) -> anyhow::Result<()> {
        let req = build_reset_request(&self.api);
        // The body is not inspected; only reachability and status are logged.
        let resp = execute(&self.client, &req).await?;
        ensure_success(&resp).context("reset request")?;
        Ok(())
    }
}
