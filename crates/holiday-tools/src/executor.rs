use crate::error::{Result, ToolError};
use crate::registry::ToolRegistry;
use crate::traits::ToolOutput;
use holiday_core::message::{ToolResult, ToolUse};
use holiday_core::Context;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    default_timeout: Duration,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            default_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub async fn execute(&self, ctx: &Context, name: &str, input: Value) -> Result<ToolOutput> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::not_found(name))?;

        if ctx.is_cancelled() {
            return Err(ToolError::Cancelled);
        }

        tool.validate_input(&input)?;

        info!(tool = name, "Executing tool");

        let execute_timeout = ctx
            .remaining()
            .unwrap_or(self.default_timeout)
            .min(self.default_timeout);

        let cancellation = ctx.cancellation_token();
        let result = tokio::select! {
            r = timeout(execute_timeout, tool.execute(ctx, input)) => r,
            _ = cancellation.cancelled() => return Err(ToolError::Cancelled),
        };

        match result {
            Ok(Ok(output)) => {
                info!(tool = name, is_error = output.is_error, "Tool execution completed");
                Ok(output)
            }
            Ok(Err(e)) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                Err(e)
            }
            Err(_) => {
                warn!(tool = name, timeout_ms = ?execute_timeout.as_millis(), "Tool execution timed out");
                Err(ToolError::Timeout(execute_timeout.as_millis() as u64))
            }
        }
    }

    /// Runs one model-requested call and folds any failure into an error
    /// result, so the model always gets an answer for every call id.
    pub async fn execute_use(&self, ctx: &Context, tool_use: &ToolUse) -> ToolResult {
        match self.execute(ctx, &tool_use.name, tool_use.input.clone()).await {
            Ok(output) if output.is_error => ToolResult::error(&tool_use.id, output.content),
            Ok(output) => ToolResult::success(&tool_use.id, output.content),
            Err(e) => ToolResult::error(&tool_use.id, e.to_string()),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
