use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::executor::Executor;
use crate::planner::{LlmPlanner, Planner};
use crate::response::AgentResponse;
use crate::session::Session;
use holiday_core::Message;
use holiday_llm::LlmProvider;
use holiday_tools::{ToolExecutor, ToolRegistry};
use std::sync::Arc;

pub struct Agent {
    config: AgentConfig,
    planner: Arc<dyn Planner>,
    tools: Option<Arc<ToolExecutor>>,
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn has_tools(&self) -> bool {
        self.tools.is_some() && self.config.tools_enabled
    }

    /// Same planner and tools, different prompt and limits.
    pub fn with_config(&self, config: AgentConfig) -> Agent {
        Agent {
            config,
            planner: self.planner.clone(),
            tools: self.tools.clone(),
        }
    }

    pub fn create_session(&self) -> Session {
        Session::generate()
    }

    /// Runs one turn and returns the final answer text.
    pub async fn run_turn(&self, session: &Session, input: &str) -> Result<String> {
        let response = self.process(session, input).await?;
        Ok(response.text)
    }

    pub async fn process(&self, session: &Session, input: &str) -> Result<AgentResponse> {
        self.process_message(session, Message::user(input)).await
    }

    /// Like [`Agent::process`] for a prepared user message, e.g. one carrying
    /// an image. The session is held for the whole turn.
    pub async fn process_message(
        &self,
        session: &Session,
        message: Message,
    ) -> Result<AgentResponse> {
        let _turn = session.begin_turn().await;
        let executor = Executor::new(self.config.clone(), self.planner.clone(), self.tools.clone());
        executor.execute(session, message).await
    }
}

#[derive(Default)]
pub struct AgentBuilder {
    config: Option<AgentConfig>,
    name: Option<String>,
    system_prompt: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    max_iterations: Option<usize>,
    tools_enabled: Option<bool>,
    llm: Option<Arc<dyn LlmProvider>>,
    planner: Option<Arc<dyn Planner>>,
    tool_registry: Option<Arc<ToolRegistry>>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn tools_enabled(mut self, enabled: bool) -> Self {
        self.tools_enabled = Some(enabled);
        self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Overrides the model-backed planner.
    pub fn planner(mut self, planner: Arc<dyn Planner>) -> Self {
        self.planner = Some(planner);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let planner: Arc<dyn Planner> = match (self.planner, self.llm) {
            (Some(planner), _) => planner,
            (None, Some(llm)) => Arc::new(LlmPlanner::new(llm)),
            (None, None) => return Err(AgentError::config("LLM provider is required")),
        };

        let mut config = self.config.unwrap_or_default();

        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(prompt) = self.system_prompt {
            config.system_prompt = prompt;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(temp) = self.temperature {
            config.temperature = temp;
        }
        if let Some(max) = self.max_tokens {
            config.max_tokens = Some(max);
        }
        if let Some(max) = self.max_iterations {
            config.max_iterations = max;
        }
        if let Some(enabled) = self.tools_enabled {
            config.tools_enabled = enabled;
        }

        let tools = self.tool_registry.map(|registry| {
            Arc::new(ToolExecutor::new(registry).with_timeout(config.tool_timeout()))
        });

        Ok(Agent {
            config,
            planner,
            tools,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::ScriptedPlanner;
    use crate::planner::Decision;
    use crate::store::SessionStore;
    use async_trait::async_trait;
    use holiday_core::Role;
    use holiday_llm::{CompletionRequest, CompletionResponse, LlmError, ModelInfo};

    struct MockLlm;

    #[async_trait]
    impl LlmProvider for MockLlm {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> std::result::Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse::new("id", "mock", Message::assistant("Hello from mock!")))
        }

        async fn list_models(&self) -> std::result::Result<Vec<ModelInfo>, LlmError> {
            Ok(vec![])
        }

        fn default_model(&self) -> &str {
            "mock"
        }
    }

    fn scripted(answers: &[&str]) -> Arc<ScriptedPlanner> {
        Arc::new(ScriptedPlanner::new(
            answers.iter().map(|a| Decision::Final(a.to_string())).collect(),
        ))
    }

    #[test]
    fn test_builder_missing_llm() {
        let result = Agent::builder().system_prompt("Answer in JSON").build();
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[tokio::test]
    async fn test_agent_run_turn() {
        let agent = Agent::builder()
            .name("test-agent")
            .system_prompt("You are helpful.")
            .model("mock")
            .temperature(0.5)
            .max_iterations(5)
            .llm(Arc::new(MockLlm))
            .build()
            .unwrap();

        assert_eq!(agent.config().name, "test-agent");
        assert_eq!(agent.config().temperature, 0.5);
        assert!(!agent.has_tools());

        let session = agent.create_session();
        let response = agent.run_turn(&session, "Hi").await.unwrap();

        assert_eq!(response, "Hello from mock!");
        assert_eq!(session.message_count(), 2);
    }

    #[tokio::test]
    async fn test_second_turn_sees_first() {
        let planner = scripted(&["answer one", "answer two"]);
        let agent = Agent::builder().planner(planner.clone()).build().unwrap();
        let session = Session::new("s");

        agent.run_turn(&session, "question one").await.unwrap();
        agent.run_turn(&session, "question two").await.unwrap();

        let texts: Vec<String> = planner
            .request(1)
            .messages
            .iter()
            .map(|m| m.text_content())
            .collect();
        assert_eq!(texts, vec!["question one", "answer one", "question two"]);
        assert_eq!(session.stats().turn_count, 2);
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_history() {
        let planner = scripted(&["a1", "b1", "a2", "b2"]);
        let agent = Agent::builder().planner(planner.clone()).build().unwrap();
        let store = SessionStore::default();

        let alice = store.get_or_create("alice").await;
        let bob = store.get_or_create("bob").await;

        agent.run_turn(&alice, "first").await.unwrap();
        agent.run_turn(&bob, "first").await.unwrap();
        agent.run_turn(&alice, "second").await.unwrap();
        agent.run_turn(&bob, "second").await.unwrap();

        // Each second-turn request holds only its own session's turns.
        for index in [2, 3] {
            let request = planner.request(index);
            assert_eq!(request.messages.len(), 3);
            assert_eq!(request.messages[0].role, Role::User);
        }
        assert_eq!(planner.request(2).messages[1].text_content(), "a1");
        assert_eq!(planner.request(3).messages[1].text_content(), "b1");
        assert_eq!(alice.message_count(), 4);
        assert_eq!(bob.message_count(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_turns_on_one_session_are_serialized() {
        let planner = scripted(&["one", "two"]);
        let agent = Arc::new(Agent::builder().planner(planner.clone()).build().unwrap());
        let session = Session::new("s");

        let (a, b) = tokio::join!(
            agent.run_turn(&session, "x"),
            agent.run_turn(&session, "y")
        );
        a.unwrap();
        b.unwrap();

        // Strict user/assistant alternation: no interleaved appends.
        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[tokio::test]
    async fn test_with_config_keeps_planner() {
        let planner = scripted(&["ok"]);
        let agent = Agent::builder().planner(planner.clone()).build().unwrap();
        let lister = agent.with_config(AgentConfig::new("gpt-4o", "List holidays."));

        lister.run_turn(&Session::new("s"), "q").await.unwrap();

        assert_eq!(planner.request(0).system.as_deref(), Some("List holidays."));
    }
}
