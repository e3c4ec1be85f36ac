//! Holiday lookup assistant.
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`core`]: messages, config, clock, errors
//! - [`llm`]: chat-completion providers
//! - [`tools`]: the Calendarific lookup and the `get_holidays` tool
//! - [`agent`]: the agent loop, sessions and the holiday tasks

pub use holiday_agent as agent;
pub use holiday_core as core;
pub use holiday_llm as llm;
pub use holiday_tools as tools;

pub use holiday_agent::{AgentConfig, HolidayAssistant, SessionStore};
pub use holiday_core::Config;
pub use holiday_tools::HolidayLookup;
