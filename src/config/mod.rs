pub mod cli;
pub mod toml_config;

pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_range, validate_required_secret, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_STORAGE_PATH: &str = "./.shoppies";
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Effective settings: built-in defaults, then the TOML file, then CLI flags.
#[derive(Clone)]
pub struct AppConfig {
    pub api_endpoint: String,
    pub api_key: Option<String>,
    pub storage_path: String,
    pub share_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_endpoint", &self.api_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("storage_path", &self.storage_path)
            .field("share_base_url", &self.share_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl AppConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(Self::default().merge_toml(&file).merge_cli(cli))
    }

    pub fn merge_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(endpoint) = file.api_endpoint() {
            self.api_endpoint = endpoint.to_string();
        }
        if let Some(key) = file.api_key() {
            self.api_key = Some(key.to_string());
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = timeout;
        }
        if let Some(path) = file.storage_path() {
            self.storage_path = path.to_string();
        }
        if let Some(base) = file.share_base_url() {
            self.share_base_url = base.to_string();
        }
        self
    }

    pub fn merge_cli(mut self, cli: &CliConfig) -> Self {
        if let Some(endpoint) = &cli.api_endpoint {
            self.api_endpoint = endpoint.clone();
        }
        if let Some(key) = &cli.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(timeout) = cli.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(path) = &cli.storage_path {
            self.storage_path = path.clone();
        }
        if let Some(base) = &cli.share_base_url {
            self.share_base_url = base.clone();
        }
        self
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn share_base_url(&self) -> &str {
        &self.share_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api_endpoint)?;
        validate_required_secret("api.api_key", self.api_key.as_deref())?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 120)?;
        validate_path("storage.path", &self.storage_path)?;
        validate_url("share.base_url", &self.share_base_url)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ShoppiesError;
    use clap::Parser;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_endpoint, "http://www.omdbapi.com/");
        assert_eq!(config.storage_path, "./.shoppies");
        assert_eq!(config.share_base_url, "http://localhost:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[api]
api_key = "file-key"
timeout_seconds = 30

[share]
base_url = "https://file.example.com"
"#,
        )
        .unwrap();
        let cli = parse(&[
            "shoppies",
            "--api-key",
            "cli-key",
            "--share-base-url",
            "https://cli.example.com",
            "list",
        ]);

        let config = AppConfig::default().merge_toml(&file).merge_cli(&cli);

        assert_eq!(config.api_key(), "cli-key");
        assert_eq!(config.share_base_url(), "https://cli.example.com");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ShoppiesError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_bad_share_base_url_fails_validation() {
        let config = AppConfig {
            api_key: Some("k".to_string()),
            share_base_url: "localhost".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ShoppiesError::InvalidConfigValueError { ref field, .. }) if field == "share.base_url"
        ));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = AppConfig {
            api_key: Some("super-secret".to_string()),
            ..AppConfig::default()
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
