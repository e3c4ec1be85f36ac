use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::planner::{Decision, Planner};
use crate::response::{AgentResponse, ToolCallRecord};
use crate::session::Session;
use holiday_core::message::{ContentBlock, ToolResult, ToolUse};
use holiday_core::{Context, Message, Role};
use holiday_llm::CompletionRequest;
use holiday_tools::ToolExecutor;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// One turn of the model-and-tools loop.
pub struct Executor {
    config: AgentConfig,
    planner: Arc<dyn Planner>,
    tools: Option<Arc<ToolExecutor>>,
}

impl Executor {
    pub fn new(
        config: AgentConfig,
        planner: Arc<dyn Planner>,
        tools: Option<Arc<ToolExecutor>>,
    ) -> Self {
        Self {
            config,
            planner,
            tools,
        }
    }

    /// Alternates between the planner and the tools until the planner gives
    /// a final answer. The user message and everything the turn produced are
    /// appended to the session only then; a failed turn leaves it untouched.
    pub async fn execute(&self, session: &Session, user_message: Message) -> Result<AgentResponse> {
        let mut turn = vec![user_message];
        let mut all_tool_calls = Vec::new();
        let mut iterations = 0;

        loop {
            iterations += 1;
            session.increment_iterations();

            if iterations > self.config.max_iterations {
                return Err(AgentError::MaxIterationsReached(self.config.max_iterations));
            }

            info!(
                session_id = session.id(),
                iteration = iterations,
                "Starting agent loop iteration"
            );

            let request = self.build_request(session, &turn);
            let (text, tool_uses) = match self.planner.decide(request).await? {
                Decision::Final(text) => {
                    turn.push(Message::assistant(&text));
                    session.add_messages(turn);

                    return Ok(AgentResponse::new(session.id(), text)
                        .with_tool_calls(all_tool_calls)
                        .with_iterations(iterations));
                }
                Decision::ToolCalls { text, calls } => (text, calls),
            };

            let mut request_blocks = Vec::with_capacity(tool_uses.len() + 1);
            if !text.is_empty() {
                request_blocks.push(ContentBlock::text(text));
            }
            request_blocks.extend(tool_uses.iter().cloned().map(ContentBlock::tool_use));
            turn.push(Message::new(Role::Assistant, request_blocks));

            let results = self.execute_tools(session, &tool_uses).await;

            for (tu, (result, duration_ms)) in tool_uses.iter().zip(&results) {
                all_tool_calls.push(ToolCallRecord {
                    id: tu.id.clone(),
                    name: tu.name.clone(),
                    input: tu.input.clone(),
                    output: result.content.clone(),
                    is_error: result.is_error,
                    duration_ms: *duration_ms,
                });
            }

            session.increment_tool_calls(results.len());
            turn.push(Message::tool(
                results
                    .into_iter()
                    .map(|(result, _)| ContentBlock::tool_result(result))
                    .collect(),
            ));
        }
    }

    /// Session history followed by the current turn, cut to the context window.
    fn build_request(&self, session: &Session, turn: &[Message]) -> CompletionRequest {
        let window = self.config.max_context_messages;
        let mut messages = session.last_messages(window);
        messages.extend_from_slice(turn);
        let excess = messages.len().saturating_sub(window);
        messages.drain(..excess);
        // A window must not open on tool results whose request was cut off.
        let orphaned = messages
            .iter()
            .take_while(|m| m.role == Role::Tool)
            .count();
        messages.drain(..orphaned);

        let mut request = CompletionRequest::new(&self.config.model, messages)
            .with_temperature(self.config.temperature);

        if !self.config.system_prompt.is_empty() {
            request = request.with_system(&self.config.system_prompt);
        }

        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        if self.config.tools_enabled {
            if let Some(tools) = &self.tools {
                let definitions = tools.registry().definitions();
                if !definitions.is_empty() {
                    request = request.with_tools(definitions);
                }
            }
        }

        request
    }

    async fn execute_tools(
        &self,
        session: &Session,
        tool_uses: &[ToolUse],
    ) -> Vec<(ToolResult, u64)> {
        let Some(tools) = self.tools.as_ref().filter(|_| self.config.tools_enabled) else {
            return tool_uses
                .iter()
                .map(|tu| {
                    let text = format!("Tool execution not available: {}", tu.name);
                    (ToolResult::error(&tu.id, text), 0)
                })
                .collect();
        };

        let ctx = Context::new()
            .with_timeout(self.config.tool_timeout())
            .with_session(session.id());
        let mut results = Vec::with_capacity(tool_uses.len());

        for tu in tool_uses {
            let start = Instant::now();
            debug!(tool = %tu.name, id = %tu.id, input = %tu.input, "Executing tool");

            let result = tools.execute_use(&ctx, tu).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            info!(tool = %tu.name, duration_ms, is_error = result.is_error, "Tool completed");
            results.push((result, duration_ms));
        }

        results
    }
}
