use crate::error::Result;
use async_trait::async_trait;
use holiday_core::message::ToolUse;
use holiday_llm::{CompletionRequest, LlmProvider};
use std::sync::Arc;
use tracing::debug;

/// What the model wants to do next.
#[derive(Clone, Debug)]
pub enum Decision {
    Final(String),
    /// `text` is whatever the model said next to the calls, often empty.
    ToolCalls { text: String, calls: Vec<ToolUse> },
}

/// Given the conversation so far, either answer or ask for tools.
#[async_trait]
pub trait Planner: Send + Sync {
    async fn decide(&self, request: CompletionRequest) -> Result<Decision>;
}

/// Lets a chat model make the decision.
pub struct LlmPlanner {
    llm: Arc<dyn LlmProvider>,
}

impl LlmPlanner {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }
}

#[async_trait]
impl Planner for LlmPlanner {
    async fn decide(&self, request: CompletionRequest) -> Result<Decision> {
        let response = self.llm.complete(request).await?;

        debug!(
            provider = self.llm.name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Model responded"
        );

        let tool_uses: Vec<ToolUse> = response
            .message
            .tool_uses()
            .into_iter()
            .cloned()
            .collect();

        if tool_uses.is_empty() {
            Ok(Decision::Final(response.text_content()))
        } else {
            Ok(Decision::ToolCalls {
                text: response.text_content(),
                calls: tool_uses,
            })
        }
    }
}
