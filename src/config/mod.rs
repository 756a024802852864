#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_socket_address, validate_url, Validate,
};
use std::path::Path;

pub use toml_config::FileConfig;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_BIND: &str = "PRICE_FINDER_BIND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

// 不輸出 API key
impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

/// 程式啟動時建立一次，之後以參考傳給 handler 與 pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
}

impl AppConfig {
    /// 預設值 → 設定檔 → 環境變數，後者覆蓋前者
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            tracing::debug!("Loading config file: {}", path.display());
            FileConfig::from_file(path)?.apply_to(&mut config);
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(api_key) = non_empty(ENV_API_KEY) {
            self.openai.api_key = Some(api_key);
        }
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.openai.base_url = base_url;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.openai.model = model;
        }
        if let Some(bind) = non_empty(ENV_BIND) {
            self.server.bind_address = bind;
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai.base_url = base_url.into();
        self
    }
}

impl ConfigProvider for AppConfig {
    fn api_key(&self) -> Option<&str> {
        self.openai
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    fn api_base_url(&self) -> &str {
        &self.openai.base_url
    }

    fn model(&self) -> &str {
        &self.openai.model
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("openai.base_url", &self.openai.base_url)?;
        validate_non_empty_string("openai.model", &self.openai.model)?;
        validate_socket_address("server.bind_address", &self.server.bind_address)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
        assert!(config.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("OPENAI_API_KEY", "sk-live"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9999/v1"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("PRICE_FINDER_BIND", "127.0.0.1:8080"),
        ]));

        assert_eq!(config.api_key(), Some("sk-live"));
        assert_eq!(config.api_base_url(), "http://127.0.0.1:9999/v1");
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_empty_env_key_counts_as_missing() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("OPENAI_API_KEY", "   ")]));
        assert!(config.api_key().is_none());

        let config = AppConfig::default().with_api_key("");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AppConfig::default().with_api_key("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = AppConfig::default().with_base_url("not a url");
        tokio_test::assert_err!(config.validate());

        let config = AppConfig::default().with_base_url("http://localhost:1234");
        tokio_test::assert_ok!(config.validate());
    }
}
