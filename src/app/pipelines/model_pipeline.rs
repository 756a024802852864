use crate::core::prompts;
use crate::core::{CountryProfile, DiscoveryOutput, LanguageModel, PricePipeline, PriceRecord};
use crate::domain::model::Stage;
use crate::domain::ports::ChatMessage;
use crate::utils::error::{PriceError, Result};
use serde::Deserialize;

/// `extract_prices` 的參數格式，缺少 results 時視為空清單
///
/// 每筆記錄個別解析，單筆格式錯誤只略過該筆
#[derive(Debug, Deserialize)]
struct ExtractedPrices {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

impl ExtractedPrices {
    fn into_records(self) -> Vec<PriceRecord> {
        let total = self.results.len();
        let records: Vec<PriceRecord> = self
            .results
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping malformed price record #{}: {}", index, e);
                    None
                }
            })
            .collect();

        if records.len() < total {
            tracing::debug!("Kept {} of {} extracted records", records.len(), total);
        }
        records
    }
}

/// 以語言模型實作的兩階段價格搜尋：搜尋 → 結構化擷取
pub struct ModelPricePipeline<L: LanguageModel> {
    model: L,
}

impl<L: LanguageModel> ModelPricePipeline<L> {
    pub fn new(model: L) -> Self {
        Self { model }
    }
}

#[async_trait::async_trait]
impl<L: LanguageModel> PricePipeline for ModelPricePipeline<L> {
    async fn discover(&self, query: &str, profile: &CountryProfile) -> Result<DiscoveryOutput> {
        let search_input = prompts::search_input(query, profile);
        let prompt = prompts::discovery_prompt(&search_input, profile);

        let listings_text =
            self.model
                .search_web(&prompt)
                .await?
                .ok_or_else(|| PriceError::EmptyResponse {
                    stage: Stage::Discovery.to_string(),
                })?;

        tracing::debug!("Web search response:\n{}", listings_text);

        Ok(DiscoveryOutput {
            search_input,
            listings_text,
        })
    }

    async fn extract(&self, discovery: DiscoveryOutput) -> Result<Option<Vec<PriceRecord>>> {
        let messages = vec![
            ChatMessage::system(prompts::extraction_system_prompt(&discovery.listings_text)),
            ChatMessage::user(discovery.search_input),
        ];

        let Some(arguments) = self
            .model
            .call_function(messages, &prompts::extract_prices_function())
            .await?
        else {
            return Ok(None);
        };

        let extracted: ExtractedPrices = serde_json::from_str(&arguments)?;
        Ok(Some(extracted.into_records()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country;
    use crate::domain::ports::FunctionSpec;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Calls {
        search_inputs: Vec<String>,
        function_messages: Vec<Vec<ChatMessage>>,
        function_names: Vec<String>,
    }

    struct MockModel {
        search_text: Option<String>,
        arguments: Option<String>,
        calls: Arc<Mutex<Calls>>,
    }

    impl MockModel {
        fn new(search_text: Option<&str>, arguments: Option<&str>) -> Self {
            Self {
                search_text: search_text.map(str::to_string),
                arguments: arguments.map(str::to_string),
                calls: Arc::new(Mutex::new(Calls::default())),
            }
        }
    }

    #[async_trait::async_trait]
    impl LanguageModel for MockModel {
        async fn search_web(&self, input: &str) -> Result<Option<String>> {
            self.calls.lock().await.search_inputs.push(input.to_string());
            Ok(self.search_text.clone())
        }

        async fn call_function(
            &self,
            messages: Vec<ChatMessage>,
            function: &FunctionSpec,
        ) -> Result<Option<String>> {
            let mut calls = self.calls.lock().await;
            calls.function_messages.push(messages);
            calls.function_names.push(function.name.clone());
            Ok(self.arguments.clone())
        }
    }

    #[tokio::test]
    async fn test_discover_builds_prompt_with_domains() {
        let model = MockModel::new(Some("Amazon $999, eBay $899"), None);
        let calls = model.calls.clone();
        let pipeline = ModelPricePipeline::new(model);
        let us = country::resolve(Some("US"));

        let output = pipeline.discover("iPhone 16 Pro, 128GB", us).await.unwrap();

        assert_eq!(output.listings_text, "Amazon $999, eBay $899");
        assert_eq!(
            output.search_input,
            "Find prices for \"iPhone 16 Pro, 128GB\" on site:amazon.com OR site:ebay.com OR site:walmart.com"
        );

        let calls = calls.lock().await;
        assert_eq!(calls.search_inputs.len(), 1);
        for domain in ["amazon.com", "ebay.com", "walmart.com"] {
            assert!(calls.search_inputs[0].contains(&format!("site:{}", domain)));
        }
    }

    #[tokio::test]
    async fn test_discover_without_text_is_error() {
        let pipeline = ModelPricePipeline::new(MockModel::new(None, None));

        let err = pipeline
            .discover("anything", country::default_profile())
            .await
            .unwrap_err();

        assert!(matches!(err, PriceError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_extract_feeds_listings_and_query() {
        let model = MockModel::new(
            None,
            Some(
                r#"{"results": [
                    {"link": "https://www.amazon.in/dp/B1", "price": 119900, "currency": "INR", "productName": "iPhone 16 Pro"},
                    {"link": "https://www.flipkart.com/p/itm2", "price": 118500, "currency": "", "productName": "Apple iPhone 16 Pro"}
                ]}"#,
            ),
        );
        let calls = model.calls.clone();
        let pipeline = ModelPricePipeline::new(model);

        let records = pipeline
            .extract(DiscoveryOutput {
                search_input: "Find prices for \"iPhone 16 Pro\"".to_string(),
                listings_text: "Flipkart ₹1,18,500".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].price, 118500.0);
        // 正規化交由 engine 處理
        assert_eq!(records[1].currency, "");

        let calls = calls.lock().await;
        assert_eq!(calls.function_names, vec!["extract_prices"]);
        let messages = &calls.function_messages[0];
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.ends_with("Flipkart ₹1,18,500"));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Find prices for \"iPhone 16 Pro\"");
    }

    #[tokio::test]
    async fn test_extract_without_tool_call_is_none() {
        let pipeline = ModelPricePipeline::new(MockModel::new(None, None));

        let result = pipeline
            .extract(DiscoveryOutput {
                search_input: "q".to_string(),
                listings_text: "text".to_string(),
            })
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_extract_missing_results_key_is_empty() {
        let pipeline = ModelPricePipeline::new(MockModel::new(None, Some("{}")));

        let result = pipeline
            .extract(DiscoveryOutput {
                search_input: "q".to_string(),
                listings_text: "text".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_extract_keeps_siblings_of_bad_record() {
        let pipeline = ModelPricePipeline::new(MockModel::new(
            None,
            Some(
                r#"{"results": [
                    {"link": "https://www.amazon.com/dp/B0A", "price": 999, "currency": "USD", "productName": "iPhone 16 Pro"},
                    {"link": "https://www.ebay.com/itm/1", "price": 899, "currency": null, "productName": "iPhone 16 Pro 128GB"},
                    {"link": "https://www.walmart.com/ip/2", "price": "n/a", "currency": "USD", "productName": "iPhone 16 Pro"},
                    "not an object"
                ]}"#,
            ),
        ));

        let records = pipeline
            .extract(DiscoveryOutput {
                search_input: "q".to_string(),
                listings_text: "text".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].currency, "USD");
        assert_eq!(records[1].currency, "");
        assert_eq!(records[1].price, 899.0);
    }

    #[tokio::test]
    async fn test_extract_malformed_arguments_is_error() {
        let pipeline = ModelPricePipeline::new(MockModel::new(None, Some("{\"results\": [")));

        let result = pipeline
            .extract(DiscoveryOutput {
                search_input: "q".to_string(),
                listings_text: "text".to_string(),
            })
            .await;

        assert!(matches!(result, Err(PriceError::SerializationError(_))));
    }
}
