use crate::error::{LlmError, Result};
use crate::traits::LlmProvider;
use crate::types::{CompletionRequest, CompletionResponse, ModelInfo, StopReason, TokenUsage};
use async_trait::async_trait;
use holiday_core::config::{LlmConfig, ProviderKind};
use holiday_core::message::{ContentBlock, ToolUse};
use holiday_core::{Message, Role};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone, Debug)]
enum Endpoint {
    OpenAi {
        base_url: String,
    },
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

/// Chat-completions client for OpenAI and Azure OpenAI deployments.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    endpoint: Endpoint,
    default_model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::build(
            api_key.into(),
            Endpoint::OpenAi {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
            Duration::from_secs(300),
        )
    }

    /// An Azure OpenAI deployment. The model name is only informational here;
    /// Azure routes by deployment.
    pub fn azure(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::build(
            api_key.into(),
            Endpoint::Azure {
                endpoint: endpoint.into().trim_end_matches('/').to_string(),
                deployment: deployment.into(),
                api_version: api_version.into(),
            },
            Duration::from_secs(300),
        )
    }

    fn build(api_key: String, endpoint: Endpoint, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            endpoint,
            default_model: "gpt-4o".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn is_azure(&self) -> bool {
        matches!(self.endpoint, Endpoint::Azure { .. })
    }

    fn completions_url(&self) -> String {
        match &self.endpoint {
            Endpoint::OpenAi { base_url } => format!("{}/chat/completions", base_url),
            Endpoint::Azure {
                endpoint,
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint, deployment, api_version
            ),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.endpoint {
            Endpoint::OpenAi { .. } => {
                request.header("Authorization", format!("Bearer {}", self.api_key))
            }
            Endpoint::Azure { .. } => request.header("api-key", &self.api_key),
        }
    }

    fn convert_messages(&self, messages: &[Message], system: Option<&str>) -> Vec<OpenAiMessage> {
        let mut result = Vec::new();

        if let Some(sys) = system {
            result.push(OpenAiMessage::text("system", sys));
        }

        for msg in messages {
            match msg.role {
                Role::System => {
                    result.push(OpenAiMessage::text("system", msg.text_content()));
                }
                Role::User => {
                    let content = if msg.has_image() {
                        self.convert_content_parts(&msg.content)
                    } else {
                        OpenAiContent::Text(msg.text_content())
                    };
                    result.push(OpenAiMessage {
                        role: "user".to_string(),
                        content: Some(content),
                        tool_calls: None,
                        tool_call_id: None,
                    });
                }
                Role::Assistant => {
                    let tool_calls: Vec<_> = msg
                        .tool_uses()
                        .into_iter()
                        .map(|tu| OpenAiToolCall {
                            id: tu.id.clone(),
                            r#type: "function".to_string(),
                            function: OpenAiFunctionCall {
                                name: tu.name.clone(),
                                arguments: tu.input.to_string(),
                            },
                        })
                        .collect();

                    let text = msg.text_content();
                    result.push(OpenAiMessage {
                        role: "assistant".to_string(),
                        content: (!text.is_empty()).then_some(OpenAiContent::Text(text)),
                        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                        tool_call_id: None,
                    });
                }
                Role::Tool => {
                    for tr in msg.content.iter().filter_map(|b| b.as_tool_result()) {
                        result.push(OpenAiMessage {
                            role: "tool".to_string(),
                            content: Some(OpenAiContent::Text(tr.content.clone())),
                            tool_calls: None,
                            tool_call_id: Some(tr.tool_use_id.clone()),
                        });
                    }
                }
            }
        }

        result
    }

    fn convert_content_parts(&self, content: &[ContentBlock]) -> OpenAiContent {
        let parts = content
            .iter()
            .filter_map(|c| match c {
                ContentBlock::Text { text } => Some(OpenAiContentPart::Text { text: text.clone() }),
                ContentBlock::Image(img) => Some(OpenAiContentPart::ImageUrl {
                    image_url: OpenAiImageUrl { url: img.data_url() },
                }),
                _ => None,
            })
            .collect();

        OpenAiContent::Parts(parts)
    }

    fn convert_tools(&self, tools: &[holiday_core::ToolDefinition]) -> Result<Vec<OpenAiTool>> {
        tools
            .iter()
            .map(|t| {
                Ok(OpenAiTool {
                    r#type: "function".to_string(),
                    function: OpenAiFunction {
                        name: t.name.clone(),
                        description: Some(t.description.clone()),
                        parameters: serde_json::to_value(&t.parameters)?,
                    },
                })
            })
            .collect()
    }

    fn build_body(&self, request: &CompletionRequest) -> Result<Value> {
        let messages = self.convert_messages(&request.messages, request.system.as_deref());

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }
        if let Some(temp) = request.temperature {
            body["temperature"] = temp.into();
        }
        if let Some(tools) = request.tools.as_ref().filter(|t| !t.is_empty()) {
            body["tools"] = serde_json::to_value(self.convert_tools(tools)?)?;
        }

        Ok(body)
    }

    fn parse_response(&self, response: OpenAiResponse) -> Result<CompletionResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::invalid_response("No choices in response"))?;

        let mut content_blocks = Vec::new();

        if let Some(text) = choice.message.content {
            content_blocks.push(ContentBlock::text(text));
        }

        for tc in choice.message.tool_calls.unwrap_or_default() {
            let input = match serde_json::from_str::<Value>(&tc.function.arguments) {
                Ok(value) => value,
                Err(e) => {
                    warn!(tool = %tc.function.name, error = %e, "Tool arguments are not JSON, passing as string");
                    Value::String(tc.function.arguments.clone())
                }
            };
            content_blocks.push(ContentBlock::tool_use(ToolUse::new(
                tc.id,
                tc.function.name,
                input,
            )));
        }

        let message = Message::new(Role::Assistant, content_blocks);

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .and_then(StopReason::from_finish_reason)
            .unwrap_or(StopReason::EndTurn);

        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse::new(response.id, response.model, message)
            .with_usage(usage)
            .with_stop_reason(stop_reason))
    }

    fn provider_label(&self) -> &'static str {
        if self.is_azure() {
            "azure"
        } else {
            "openai"
        }
    }
}

/// Builds the provider described by the `[llm]` config section.
pub fn provider_from_config(config: &LlmConfig) -> Result<OpenAiProvider> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| LlmError::config("llm.api_key is not set"))?;

    let provider = match config.provider {
        ProviderKind::OpenAi => match &config.base_url {
            Some(base_url) => OpenAiProvider::with_base_url(api_key, base_url),
            None => OpenAiProvider::new(api_key),
        },
        ProviderKind::Azure => {
            let endpoint = config
                .base_url
                .clone()
                .ok_or_else(|| LlmError::config("llm.base_url is required for azure"))?;
            let deployment = config
                .deployment
                .clone()
                .unwrap_or_else(|| config.model.clone());
            OpenAiProvider::azure(endpoint, deployment, &config.api_version, api_key)
        }
    };

    provider
        .with_model(&config.model)
        .with_timeout(Duration::from_secs(config.timeout_secs))
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        self.provider_label()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_body(&request)?;

        debug!(
            provider = self.provider_label(),
            model = %request.model,
            messages = request.messages.len(),
            tools = request.has_tools(),
            "Sending chat completion"
        );

        let response = self
            .authorize(self.client.post(self.completions_url()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    LlmError::rate_limited(self.provider_label(), None)
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LlmError::AuthenticationFailed(format!("{}: {}", status, text))
                }
                _ => LlmError::api(self.provider_label(), format!("{}: {}", status, text)),
            });
        }

        let openai_response: OpenAiResponse = response.json().await?;
        self.parse_response(openai_response)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![
            ModelInfo::new("gpt-4o", self.provider_label())
                .with_name("GPT-4o")
                .with_context_window(128000)
                .with_tools()
                .with_vision(),
            ModelInfo::new("gpt-4o-mini", self.provider_label())
                .with_name("GPT-4o Mini")
                .with_context_window(128000)
                .with_tools()
                .with_vision(),
        ])
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<OpenAiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAiMessage {
    fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(OpenAiContent::Text(text.into())),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum OpenAiContent {
    Text(String),
    Parts(Vec<OpenAiContentPart>),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum OpenAiContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: OpenAiImageUrl },
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiImageUrl {
    url: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    r#type: String,
    function: OpenAiFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiTool {
    r#type: String,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiFunction {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    id: String,
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
