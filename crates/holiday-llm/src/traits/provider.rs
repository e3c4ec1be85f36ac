use crate::error::Result;
use crate::types::{CompletionRequest, CompletionResponse, ModelInfo};
use async_trait::async_trait;

/// A hosted chat model: messages in, one assistant message out.
///
/// The assistant message may carry tool-use blocks instead of (or next to)
/// text; the agent loop decides what to do with them.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    fn default_model(&self) -> &str;
}
