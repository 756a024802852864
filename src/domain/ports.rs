use crate::domain::model::{CountryProfile, DiscoveryOutput, PriceRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 強制模型呼叫的函式定義（name + JSON schema）
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

pub trait ConfigProvider: Send + Sync {
    /// 空字串視同未設定
    fn api_key(&self) -> Option<&str>;
    fn api_base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// 外部語言模型服務
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 帶網頁搜尋能力的自由文字生成，沒有文字輸出時回傳 None
    async fn search_web(&self, input: &str) -> Result<Option<String>>;

    /// 強制呼叫 `function`，回傳第一個 tool call 的原始 arguments
    async fn call_function(
        &self,
        messages: Vec<ChatMessage>,
        function: &FunctionSpec,
    ) -> Result<Option<String>>;
}

#[async_trait]
pub trait PricePipeline: Send + Sync {
    async fn discover(&self, query: &str, profile: &CountryProfile) -> Result<DiscoveryOutput>;

    /// `Ok(None)` 表示服務沒有回傳結構化資料
    async fn extract(&self, discovery: DiscoveryOutput) -> Result<Option<Vec<PriceRecord>>>;
}
