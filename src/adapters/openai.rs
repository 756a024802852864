use crate::domain::ports::{ChatMessage, ConfigProvider, FunctionSpec, LanguageModel};
use crate::utils::error::{PriceError, Result};
use crate::utils::logger::truncate_for_log;
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const WEB_SEARCH_TOOL: &str = "web_search_preview";

/// OpenAI API 客戶端（Responses API + Chat Completions）
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new<C: ConfigProvider>(client: Client, config: &C) -> Result<Self> {
        let api_key = config.api_key();
        let api_key = validate_required_field("OPENAI_API_KEY", &api_key)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.endpoint(path);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let body = truncate_for_log(&body, 500);
            tracing::warn!("OpenAI API returned {}: {}", status, body);
            return Err(PriceError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    tools: Vec<ToolType<'a>>,
}

#[derive(Debug, Serialize)]
struct ToolType<'a> {
    r#type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// 取出文字輸出：優先 `output_text`，否則串接所有 output_text 片段
    fn into_text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.trim().is_empty()) {
            return Some(text);
        }

        let text = self
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|content| content.r#type == "output_text")
            .filter_map(|content| content.text)
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    tools: Vec<FunctionTool<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionTool<'a> {
    r#type: &'a str,
    function: FunctionDefinition<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionDefinition<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    r#type: &'a str,
    function: FunctionName<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionName<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    #[serde(default)]
    arguments: Option<String>,
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn search_web(&self, input: &str) -> Result<Option<String>> {
        let request = ResponsesRequest {
            model: &self.model,
            input,
            tools: vec![ToolType {
                r#type: WEB_SEARCH_TOOL,
            }],
        };

        let response: ResponsesResponse = self.post_json("responses", &request).await?;
        Ok(response.into_text())
    }

    async fn call_function(
        &self,
        messages: Vec<ChatMessage>,
        function: &FunctionSpec,
    ) -> Result<Option<String>> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            tools: vec![FunctionTool {
                r#type: "function",
                function: FunctionDefinition {
                    name: &function.name,
                    description: &function.description,
                    parameters: &function.parameters,
                },
            }],
            tool_choice: ToolChoice {
                r#type: "function",
                function: FunctionName {
                    name: &function.name,
                },
            },
        };

        let response: ChatCompletionResponse =
            self.post_json("chat/completions", &request).await?;

        let arguments = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls)
            .and_then(|calls| calls.into_iter().next())
            .and_then(|call| call.function.arguments)
            .filter(|args| !args.trim().is_empty());

        Ok(arguments)
    }
}
