use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api_base_url is empty")]
    EmptyBaseUrl,
    #[error("api_base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),
    #[error("api_base_url must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("invalid value for {key}: {value}")]
    InvalidOverride { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,

    // No timeout unless one is configured: a hung request keeps the session
    // busy until it resolves, and reset is the way out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub const ENV_API_URL: &'static str = "CIVICDESK_API_URL";
    pub const ENV_TIMEOUT_SECS: &'static str = "CIVICDESK_TIMEOUT_SECS";

    pub fn validate(&self) -> Result<(), ConfigError> {
        let raw = self.api_base_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let parsed =
            url::Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Applies overrides from a variable lookup (normally `std::env::var`).
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(Self::ENV_API_URL) {
            let url = url.trim();
            if !url.is_empty() {
                self.api_base_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(Self::ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidOverride {
                    key: Self::ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            // 0 means "no timeout".
            self.request_timeout_secs = (secs > 0).then_some(secs);
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url, "http://localhost:8000");
        assert_eq!(cfg.request_timeout_secs, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_urls() {
        let mut cfg = AppConfig::default();
        cfg.api_base_url = "  ".into();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyBaseUrl));

        cfg.api_base_url = "localhost:8000/api".into();
        assert!(cfg.validate().is_err());

        cfg.api_base_url = "ftp://example.com".into();
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnsupportedScheme("ftp".into()))
        );
    }

    #[test]
    fn overrides_apply() {
        let cfg = AppConfig::default()
            .apply_overrides(|k| match k {
                "CIVICDESK_API_URL" => Some("https://intake.example.org".into()),
                "CIVICDESK_TIMEOUT_SECS" => Some("15".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(cfg.api_base_url, "https://intake.example.org");
        assert_eq!(cfg.request_timeout_secs, Some(15));

        let cfg = cfg
            .apply_overrides(|k| (k == "CIVICDESK_TIMEOUT_SECS").then(|| "0".to_string()))
            .unwrap();
        assert_eq!(cfg.request_timeout_secs, None);
    }

    #[test]
    fn bad_timeout_override_errors() {
        let err = AppConfig::default()
            .apply_overrides(|k| (k == "CIVICDESK_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }

    #[test]
    fn timeouts_are_optional_in_json() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"api_base_url":"http://localhost:9000"}"#).unwrap();
        assert_eq!(cfg.connect_timeout_secs, None);
    }
}
