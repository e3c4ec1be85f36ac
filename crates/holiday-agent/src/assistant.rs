use crate::agent::Agent;
use crate::answer::{
    decide_addition, parse_answer, AddHolidayAnswer, HolidayEntry, HolidayListAnswer, ScoreAnswer,
};
use crate::config::AgentConfig;
use crate::error::Result;
use crate::normalize::normalize;
use crate::planner::{LlmPlanner, Planner};
use crate::prompts;
use crate::session::Session;
use crate::store::SessionStore;
use holiday_core::{ImageContent, Message};
use holiday_llm::LlmProvider;
use holiday_tools::{create_default_registry, HolidayLookup};
use std::sync::Arc;
use tracing::info;

/// The holiday tasks: one prompt each, answers normalized, with `*_typed`
/// variants that validate the JSON shape.
pub struct HolidayAssistant {
    agent: Agent,
    sessions: SessionStore,
}

impl HolidayAssistant {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        lookup: Arc<HolidayLookup>,
        config: AgentConfig,
    ) -> Result<Self> {
        Self::with_planner(Arc::new(LlmPlanner::new(llm)), lookup, config)
    }

    pub fn with_planner(
        planner: Arc<dyn Planner>,
        lookup: Arc<HolidayLookup>,
        config: AgentConfig,
    ) -> Result<Self> {
        let agent = Agent::builder()
            .config(config)
            .planner(planner)
            .tool_registry(Arc::new(create_default_registry(lookup)))
            .build()?;

        Ok(Self {
            agent,
            sessions: SessionStore::default(),
        })
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn end_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).await.is_some()
    }

    fn task(&self, prompt: &str, tools: bool) -> Agent {
        let config = self
            .agent
            .config()
            .clone()
            .with_system_prompt(prompt)
            .with_tools_enabled(tools);
        self.agent.with_config(config)
    }

    async fn ask(&self, prompt: &str, tools: bool, session: &Session, input: Message) -> Result<String> {
        let response = self.task(prompt, tools).process_message(session, input).await?;
        Ok(normalize(&response.text).to_string())
    }

    /// Holidays from the model's own knowledge.
    pub async fn list_holidays(&self, question: &str) -> Result<String> {
        self.ask(
            prompts::HOLIDAY_LIST,
            false,
            &Session::generate(),
            Message::user(question),
        )
        .await
    }

    pub async fn list_holidays_typed(&self, question: &str) -> Result<HolidayListAnswer> {
        parse_answer(&self.list_holidays(question).await?)
    }

    /// Holidays the model looked up through `get_holidays`.
    pub async fn list_holidays_with_tools(&self, question: &str) -> Result<String> {
        self.ask(
            prompts::HOLIDAY_LIST_WITH_TOOL,
            true,
            &Session::generate(),
            Message::user(question),
        )
        .await
    }

    pub async fn list_holidays_with_tools_typed(&self, question: &str) -> Result<HolidayListAnswer> {
        parse_answer(&self.list_holidays_with_tools(question).await?)
    }

    /// Two turns in one session: list holidays, then ask whether another
    /// should be added. The second turn sees the first turn's listing.
    pub async fn check_new_holiday(
        &self,
        session_id: &str,
        list_question: &str,
        candidate_question: &str,
    ) -> Result<String> {
        let session = self.sessions.get_or_create(session_id).await;

        self.ask(
            prompts::HOLIDAY_LIST_WITH_TOOL,
            true,
            &session,
            Message::user(list_question),
        )
        .await?;

        self.ask(
            prompts::ADD_HOLIDAY,
            true,
            &session,
            Message::user(candidate_question),
        )
        .await
    }

    pub async fn check_new_holiday_typed(
        &self,
        session_id: &str,
        list_question: &str,
        candidate_question: &str,
    ) -> Result<AddHolidayAnswer> {
        parse_answer(
            &self
                .check_new_holiday(session_id, list_question, candidate_question)
                .await?,
        )
    }

    /// Like [`HolidayAssistant::check_new_holiday`], but the comparison is
    /// made here: the candidate is new unless the listing has the same date
    /// and name. The decision is recorded in the session.
    pub async fn check_candidate(
        &self,
        session_id: &str,
        list_question: &str,
        candidate: &HolidayEntry,
    ) -> Result<AddHolidayAnswer> {
        let session = self.sessions.get_or_create(session_id).await;

        let listing = self
            .ask(
                prompts::HOLIDAY_LIST_WITH_TOOL,
                true,
                &session,
                Message::user(list_question),
            )
            .await?;
        let listing: HolidayListAnswer = parse_answer(&listing)?;

        let decision = decide_addition(&listing, candidate);
        info!(
            session_id = session_id,
            date = %candidate.date,
            name = %candidate.name,
            add = decision.result.add,
            "Checked candidate holiday"
        );

        let _turn = session.begin_turn().await;
        session.add_message(Message::user(format!(
            "Should {} on {} be added?",
            candidate.name, candidate.date
        )));
        session.add_message(Message::assistant(serde_json::to_string(&decision)?));

        Ok(decision)
    }

    /// Free-form turn in a named session, with the holiday tool available.
    pub async fn chat(&self, session_id: &str, input: &str) -> Result<String> {
        let session = self.sessions.get_or_create(session_id).await;
        self.task(prompts::CHAT, true)
            .run_turn(&session, input)
            .await
    }

    /// Reads a score off an image.
    pub async fn read_score(&self, question: &str, image: ImageContent) -> Result<String> {
        self.ask(
            prompts::SCORE,
            false,
            &Session::generate(),
            Message::user_with_image(question, image),
        )
        .await
    }

    pub async fn read_score_typed(&self, question: &str, image: ImageContent) -> Result<ScoreAnswer> {
        parse_answer(&self.read_score(question, image).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use crate::executor::mock::{holiday_call, ScriptedPlanner};
    use crate::planner::Decision;
    use async_trait::async_trait;
    use holiday_core::message::Source;
    use holiday_core::{FixedClock, Role};
    use holiday_tools::{FetchError, HolidayApi, HolidayQuery};

    struct TaiwanOctober;

    #[async_trait]
    impl HolidayApi for TaiwanOctober {
        async fn fetch(&self, _query: &HolidayQuery) -> std::result::Result<String, FetchError> {
            Ok(r#"{"meta":{"code":200},"response":{"holidays":[
                {"name":"國慶日","date":{"iso":"2024-10-10"}},
                {"name":"臺灣光復節","date":{"iso":"2024-10-25"}}
            ]}}"#
                .to_string())
        }
    }

    const LISTING: &str = "```json\n{\"Result\":[{\"date\":\"2024-10-10\",\"name\":\"國慶日\"},{\"date\":\"2024-10-25\",\"name\":\"臺灣光復節\"}]}\n```";

    fn assistant(decisions: Vec<Decision>) -> (HolidayAssistant, Arc<ScriptedPlanner>) {
        let planner = Arc::new(ScriptedPlanner::new(decisions));
        let lookup = HolidayLookup::new(Arc::new(TaiwanOctober))
            .with_clock(Arc::new(FixedClock::year(2024)));
        let assistant = HolidayAssistant::with_planner(
            planner.clone(),
            Arc::new(lookup),
            AgentConfig::new("gpt-4o", ""),
        )
        .unwrap();
        (assistant, planner)
    }

    #[tokio::test]
    async fn test_list_holidays_without_tools() {
        let (assistant, planner) = assistant(vec![Decision::Final(LISTING.into())]);

        let answer = assistant
            .list_holidays_typed("2024年台灣10月紀念日有哪些?")
            .await
            .unwrap();

        assert_eq!(answer.result.len(), 2);
        let request = planner.request(0);
        assert!(!request.has_tools());
        assert_eq!(request.system.as_deref(), Some(prompts::HOLIDAY_LIST));
    }

    #[tokio::test]
    async fn test_list_holidays_with_tools_normalizes() {
        let (assistant, planner) = assistant(vec![
            holiday_call("call_1", "TW,2024"),
            Decision::Final(LISTING.into()),
        ]);

        let text = assistant
            .list_holidays_with_tools("2024年台灣10月紀念日有哪些?")
            .await
            .unwrap();

        assert!(text.starts_with("{\"Result\""));
        assert!(planner.request(0).has_tools());

        let tool_result = &planner.request(1).messages[2];
        assert_eq!(tool_result.role, Role::Tool);
        assert!(tool_result.content[0]
            .as_tool_result()
            .unwrap()
            .content
            .contains("- 國慶日 (2024-10-10)"));
    }

    #[tokio::test]
    async fn test_check_new_holiday_second_turn_sees_listing() {
        let (assistant, planner) = assistant(vec![
            holiday_call("call_1", "TW,2024"),
            Decision::Final(LISTING.into()),
            Decision::Final("{\"Result\":{\"add\":true,\"reason\":\"不在清單中\"}}".into()),
        ]);

        let answer = assistant
            .check_new_holiday_typed(
                "user-1",
                "2024年台灣10月紀念日有哪些?",
                "根據先前的節日清單，這個節日{\"date\": \"10-31\", \"name\": \"蔣公誕辰紀念日\"}是否有在該月份清單？",
            )
            .await
            .unwrap();

        assert!(answer.result.add);

        let second_turn = planner.request(2);
        assert_eq!(second_turn.system.as_deref(), Some(prompts::ADD_HOLIDAY));
        let history: Vec<String> = second_turn.messages.iter().map(|m| m.text_content()).collect();
        assert_eq!(history[0], "2024年台灣10月紀念日有哪些?");
        assert!(history.iter().any(|t| t.contains("臺灣光復節")));
        assert!(history.last().unwrap().contains("蔣公誕辰紀念日"));
    }

    #[tokio::test]
    async fn test_check_candidate_is_deterministic() {
        let (assistant, _planner) = assistant(vec![
            Decision::Final(LISTING.into()),
            Decision::Final(LISTING.into()),
        ]);

        let existing = assistant
            .check_candidate("a", "October holidays?", &HolidayEntry::new("2024-10-10", "國慶日"))
            .await
            .unwrap();
        assert!(!existing.result.add);

        let new = assistant
            .check_candidate(
                "b",
                "October holidays?",
                &HolidayEntry::new("2024-10-31", "蔣公誕辰紀念日"),
            )
            .await
            .unwrap();
        assert!(new.result.add);

        let session = assistant.sessions().get("b").await.unwrap();
        let last = session.last_answer().unwrap();
        assert!(last.contains("\"add\":true"));
    }

    #[tokio::test]
    async fn test_invalid_answer_is_reported() {
        let (assistant, _planner) = assistant(vec![Decision::Final("I think there are two.".into())]);

        let err = assistant.list_holidays_typed("q").await.unwrap_err();

        assert!(matches!(err, AgentError::InvalidAnswer { expected: "HolidayListAnswer", .. }));
        assert_eq!(err.raw_answer(), Some("I think there are two."));
    }

    #[tokio::test]
    async fn test_read_score_sends_image() {
        let (assistant, planner) = assistant(vec![Decision::Final(
            "{\"Result\":{\"score\":5498}}".into(),
        )]);
        let image = ImageContent::new(Source::base64("AAAA")).with_media_type("image/png");

        let score = assistant
            .read_score_typed("請問中華台北的積分是多少", image)
            .await
            .unwrap();

        assert_eq!(score.result.score, 5498);
        let request = planner.request(0);
        assert!(request.messages[0].has_image());
        assert!(!request.has_tools());
    }

    #[tokio::test]
    async fn test_chat_keeps_history_per_session() {
        let (assistant, planner) = assistant(vec![
            Decision::Final("hi".into()),
            Decision::Final("again".into()),
        ]);

        assistant.chat("s", "hello").await.unwrap();
        let reply = assistant.chat("s", "and now?").await.unwrap();

        assert_eq!(reply, "again");
        let second = planner.request(1);
        assert_eq!(second.system.as_deref(), Some(prompts::CHAT));
        assert_eq!(second.messages.len(), 3);
    }

    #[tokio::test]
    async fn test_end_session() {
        let (assistant, _planner) = assistant(vec![]);
        assistant.sessions().get_or_create("x").await;

        assert!(assistant.end_session("x").await);
        assert!(!assistant.end_session("x").await);
    }
}
