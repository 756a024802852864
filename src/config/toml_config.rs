use crate::config::AppConfig;
use crate::utils::error::Result;
use serde::Deserialize;
use std::path::Path;

/// 設定檔格式。API key 只從環境變數讀取，檔案中出現未知欄位會直接報錯
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub openai: Option<OpenAiSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub bind_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiSection {
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_to(self, config: &mut AppConfig) {
        if let Some(server) = self.server {
            if let Some(bind_address) = server.bind_address {
                config.server.bind_address = bind_address;
            }
        }

        if let Some(openai) = self.openai {
            if let Some(base_url) = openai.base_url {
                config.openai.base_url = base_url;
            }
            if let Some(model) = openai.model {
                config.openai.model = model;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PriceError;

    #[test]
    fn test_parse_full_file() {
        let file = FileConfig::from_toml_str(
            r#"
[server]
bind_address = "127.0.0.1:8080"

[openai]
base_url = "https://proxy.internal/v1"
model = "gpt-4o"
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.openai.base_url, "https://proxy.internal/v1");
        assert_eq!(config.openai.model, "gpt-4o");
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = FileConfig::from_toml_str("[openai]\nmodel = \"gpt-4.1-mini\"\n").unwrap();

        let mut config = AppConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.openai.model, "gpt-4.1-mini");
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_api_key_in_file_is_rejected() {
        let result = FileConfig::from_toml_str("[openai]\napi_key = \"sk-leaked\"\n");
        assert!(matches!(result, Err(PriceError::TomlError(_))));
    }

    #[test]
    fn test_empty_file() {
        let file = FileConfig::from_toml_str("").unwrap();
        assert!(file.server.is_none());
        assert!(file.openai.is_none());
    }
}
