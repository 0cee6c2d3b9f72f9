use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::runtime::HttpResponse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("intake service returned status {status}")]
    Status { status: u16 },
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Any non-2xx status counts as a failed call.
pub fn ensure_success(resp: &HttpResponse) -> Result<(), RemoteError> {
    if (200..=299).contains(&resp.status) {
        Ok(())
    } else {
        Err(RemoteError::Status {
            status: resp.status,
        })
    }
}

pub fn parse_chat_reply(body: &[u8]) -> anyhow::Result<String> {
    let resp: ChatReply = serde_json::from_slice(body).context("decode chat reply JSON")?;
    Ok(resp.reply)
}

pub fn parse_health(body: &[u8]) -> anyhow::Result<HealthStatus> {
    serde_json::from_slice(body).context("decode health JSON")
}
