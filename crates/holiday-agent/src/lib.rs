pub mod agent;
pub mod answer;
pub mod assistant;
pub mod config;
pub mod error;
pub mod executor;
pub mod normalize;
pub mod planner;
pub mod prompts;
pub mod response;
pub mod session;
pub mod store;

pub use agent::{Agent, AgentBuilder};
pub use answer::{
    decide_addition, parse_answer, AddDecision, AddHolidayAnswer, Answer, HolidayEntry,
    HolidayListAnswer, Score, ScoreAnswer,
};
pub use assistant::HolidayAssistant;
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use normalize::normalize;
pub use planner::{Decision, LlmPlanner, Planner};
pub use response::{AgentResponse, ToolCallRecord};
pub use session::{Session, SessionStats};
pub use store::SessionStore;

pub mod prelude {
    pub use crate::agent::{Agent, AgentBuilder};
    pub use crate::answer::{parse_answer, HolidayEntry, HolidayListAnswer};
    pub use crate::assistant::HolidayAssistant;
    pub use crate::config::AgentConfig;
    pub use crate::error::{AgentError, Result};
    pub use crate::normalize::normalize;
    pub use crate::planner::{Decision, Planner};
    pub use crate::response::AgentResponse;
    pub use crate::session::{Session, SessionStats};
    pub use crate::store::SessionStore;
}
