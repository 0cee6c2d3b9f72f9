use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use civicdesk_core::config::AppConfig;
use civicdesk_engine::session::IntakeSession;

use crate::config_store::ConfigStore;
use crate::remote::HttpIntakeRemote;

const DEFAULT_CONFIG_FILE: &str = "civicdesk.json";

/// Loads config: file (if any) first, then environment overrides.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var(ConfigStore::ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    let store = ConfigStore::at_path(path);

    let cfg = store
        .load_or_default()?
        .apply_overrides(|key| std::env::var(key).ok())?;
    cfg.validate()
        .with_context(|| format!("invalid config ({})", store.path().display()))?;
    Ok(cfg)
}

/// Build a ready intake session plus its HTTP client from config.
///
/// The client is returned too so front ends can run the health probe.
pub fn build_session_from_config(
    cfg: &AppConfig,
) -> anyhow::Result<(IntakeSession, Arc<HttpIntakeRemote>)> {
    cfg.validate().context("invalid config")?;
    let remote = Arc::new(HttpIntakeRemote::from_config(cfg)?);
    let session = IntakeSession::new(remote.clone());
    log::info!("intake session ready against {}", remote.base_url());
    Ok((session, remote))
}
