use crate::adapters::OpenAiClient;
use crate::app::pipelines::ModelPricePipeline;
use crate::core::country;
use crate::core::engine::PriceSearchEngine;
use crate::core::normalize::sort_by_price;
use crate::core::{ConfigProvider, CountryProfile, PricePipeline, SearchResult};
use crate::domain::model::PriceRequest;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("Missing required environment variables")]
    MissingCredentials,

    #[error("Please enter a product to search for")]
    InvalidQuery,

    #[error("Unsupported country: {code}. Supported countries: {supported}")]
    UnsupportedCountry { code: String, supported: String },

    #[error("Failed to fetch prices")]
    Internal,
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::InvalidQuery | HandlerError::UnsupportedCountry { .. } => 400,
            HandlerError::MissingCredentials | HandlerError::Internal => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 邊界上的嚴格檢查：有給代碼就必須在支援清單內
pub fn validate_country(code: &str) -> Result<&'static CountryProfile, HandlerError> {
    country::lookup(code).ok_or_else(|| HandlerError::UnsupportedCountry {
        code: country::normalize_code(code),
        supported: country::supported_codes().join(", "),
    })
}

/// 沒給或給空字串時走寬鬆解析（預設 US）
pub fn resolve_request_country(code: Option<&str>) -> Result<&'static CountryProfile, HandlerError> {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => validate_country(code),
        None => Ok(country::resolve(None)),
    }
}

/// 執行兩階段搜尋並依價格排序組成回應
pub async fn run_search<P: PricePipeline>(
    engine: &PriceSearchEngine<P>,
    query: &str,
    profile: &CountryProfile,
) -> SearchResult {
    let mut results = engine.search_records(query, profile).await;
    sort_by_price(&mut results);

    SearchResult {
        country: profile.display_name.to_string(),
        country_code: profile.code.to_string(),
        currency: profile.currency_code.to_string(),
        results,
    }
}

pub struct PriceHandler<C: ConfigProvider> {
    config: Arc<C>,
    client: Client,
}

impl<C: ConfigProvider> PriceHandler<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub async fn handle(&self, request: PriceRequest) -> Result<SearchResult, HandlerError> {
        if self.config.api_key().is_none() {
            tracing::error!("❌ OPENAI_API_KEY is not configured");
            return Err(HandlerError::MissingCredentials);
        }

        let query = request.query.trim();
        if query.is_empty() {
            return Err(HandlerError::InvalidQuery);
        }

        let profile = resolve_request_country(request.country.as_deref())?;
        tracing::info!(
            "Searching for {:?} in {} ({})",
            query,
            profile.display_name,
            profile.code
        );

        let model = OpenAiClient::new(self.client.clone(), self.config.as_ref()).map_err(|e| {
            tracing::error!("❌ Failed to build OpenAI client: {}", e);
            HandlerError::Internal
        })?;
        let engine = PriceSearchEngine::new(ModelPricePipeline::new(model));

        let result = run_search(&engine, query, profile).await;
        tracing::info!(
            "📦 Returning {} results for {} ({})",
            result.results.len(),
            query,
            profile.code
        );
        Ok(result)
    }
}
