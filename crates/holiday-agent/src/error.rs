use holiday_core::error::Error as CoreError;
use holiday_llm::LlmError;
use holiday_tools::ToolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Max iterations reached: {0}")]
    MaxIterationsReached(usize),

    /// The model answered, but not in the requested JSON shape.
    #[error("Invalid answer (expected {expected}): {reason}")]
    InvalidAnswer {
        expected: &'static str,
        reason: String,
        raw: String,
    },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn invalid_answer(
        expected: &'static str,
        reason: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self::InvalidAnswer {
            expected,
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// The model's text, when the failure was about its shape.
    pub fn raw_answer(&self) -> Option<&str> {
        match self {
            Self::InvalidAnswer { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
