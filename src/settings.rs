use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Environment variable prefix, e.g. `DHLAB_DISPERSION__UPSTREAM__TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "DHLAB_DISPERSION";

/// Full service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to bind (e.g., `0.0.0.0:3001`).
    pub bind_addr: String,
    /// Directory with the built UI, served for paths outside `/api`.
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Connection settings for the DHLAB and catalog APIs.
///
/// Read-only after startup; handed to the upstream client explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// Base URL of the DHLAB text-analysis API.
    pub dhlab_base_url: String,
    /// Base URL of the catalog API (metadata, suggestions).
    pub catalog_base_url: String,
    /// Timeout applied to every outbound call.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl UpstreamSettings {
    /// Build with explicit base URLs and default timeout and user agent
    /// (useful for testing).
    pub fn new(dhlab_base_url: impl Into<String>, catalog_base_url: impl Into<String>) -> Self {
        Self {
            dhlab_base_url: dhlab_base_url.into(),
            catalog_base_url: catalog_base_url.into(),
            timeout_secs: 30,
            user_agent: "Narrative-Buer-PWA/1.0".to_string(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Layer built-in defaults, an optional config file and environment
    /// variables, in that order of precedence.
    ///
    /// `config_path` is passed to `config::File::with_name`, so the extension
    /// may be omitted.
    pub fn load(config_path: Option<&str>) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .set_default("server.bind_addr", "0.0.0.0:3001")
            .and_then(|b| b.set_default("upstream.dhlab_base_url", "https://api.nb.no/dhlab"))
            .and_then(|b| {
                b.set_default("upstream.catalog_base_url", "https://api.nb.no/catalog/v1")
            })
            .and_then(|b| b.set_default("upstream.timeout_secs", 30_i64))
            .and_then(|b| b.set_default("upstream.user_agent", "Narrative-Buer-PWA/1.0"))
            .map_err(|e| AppError::Internal(format!("Invalid default configuration: {e}")))?;

        builder
            .add_source(
                config::File::with_name(config_path.unwrap_or("config/default")).required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {e}")))
    }
}
