use crate::display::DiscountFormula;
use crate::error::DetailError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub discount_formula: DiscountFormula,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: ConfigDefaults,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigDefaults {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    discount_formula: Option<DiscountFormula>,
}

impl AppConfig {
    pub fn load(base_url: Option<String>, legacy_discount: bool) -> Result<Self, DetailError> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("detail-view");
        let file_config = load_config_file(&config_dir.join("config.toml"));
        let base_url_env = std::env::var("DETAIL_VIEW_BASE_URL").ok();

        Self::resolve(file_config, base_url, base_url_env, legacy_discount)
    }

    // Priority: CLI flags → env vars → config file → defaults
    fn resolve(
        file_config: ConfigFile,
        base_url: Option<String>,
        base_url_env: Option<String>,
        legacy_discount: bool,
    ) -> Result<Self, DetailError> {
        let base_url = base_url
            .or(base_url_env)
            .or(file_config.defaults.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Self::validate_base_url(&base_url)?;

        let discount_formula = if legacy_discount {
            DiscountFormula::Legacy
        } else {
            file_config.defaults.discount_formula.unwrap_or_default()
        };

        let timeout = file_config
            .defaults
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(AppConfig {
            base_url,
            timeout,
            discount_formula,
        })
    }

    pub fn validate_base_url(raw: &str) -> Result<Url, DetailError> {
        let url = Url::parse(raw)
            .map_err(|e| DetailError::Config(format!("Invalid base URL '{}': {}", raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DetailError::Config(format!(
                "Base URL '{}' must use http or https",
                raw
            )));
        }
        Ok(url)
    }
}

fn load_config_file(config_path: &Path) -> ConfigFile {
    if !config_path.exists() {
        return ConfigFile::default();
    }
    match std::fs::read_to_string(config_path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config {}: {}", config_path.display(), e);
            ConfigFile::default()
        }),
        Err(e) => {
            tracing::warn!("Failed to read config {}: {}", config_path.display(), e);
            ConfigFile::default()
        }
    }
}
