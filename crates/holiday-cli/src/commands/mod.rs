pub mod chat;
pub mod check;
pub mod list;
pub mod lookup;
pub mod score;

use crate::GlobalArgs;
use colored::Colorize;
use holiday_agent::{AgentConfig, AgentError, HolidayAssistant, SessionStore};
use holiday_core::Config;
use holiday_llm::provider_from_config;
use holiday_tools::HolidayLookup;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// File (or defaults), then environment, then command-line flags.
pub fn load_config(args: &GlobalArgs) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_default()?,
    };
    let mut config = config.merge_env();

    if let Some(key) = &args.api_key {
        config.llm.api_key = Some(key.clone());
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(key) = &args.calendar_key {
        config.calendar.api_key = Some(key.clone());
    }

    Ok(config)
}

pub fn create_lookup(config: &Config) -> anyhow::Result<HolidayLookup> {
    HolidayLookup::from_config(&config.calendar).map_err(|e| {
        anyhow::anyhow!("{}. Set CALENDARIFIC_API_KEY or use --calendar-key", e)
    })
}

pub fn create_assistant(config: &Config) -> anyhow::Result<HolidayAssistant> {
    let llm = provider_from_config(&config.llm).map_err(|e| {
        anyhow::anyhow!("{}. Set OPENAI_API_KEY or use --api-key", e)
    })?;
    let lookup = create_lookup(config)?;

    let assistant = HolidayAssistant::new(
        Arc::new(llm),
        Arc::new(lookup),
        AgentConfig::from_config(config),
    )
    .map_err(|e| anyhow::anyhow!("Failed to create assistant: {}", e))?
    .with_sessions(SessionStore::from_config(&config.sessions));

    debug!(
        model = %config.llm.model,
        max_sessions = config.sessions.max_sessions,
        "Assistant ready"
    );

    Ok(assistant)
}

/// Pretty JSON for a validated answer; the model's text for a rejected one.
pub fn print_answer<T: Serialize>(result: Result<T, AgentError>) -> anyhow::Result<()> {
    match result {
        Ok(answer) => {
            println!("{}", serde_json::to_string_pretty(&answer)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if let Some(raw) = e.raw_answer() {
                eprintln!("{}\n{}", "Model answered:".yellow(), raw);
            }
            std::process::exit(1);
        }
    }
}

pub fn print_text(result: Result<String, AgentError>) -> anyhow::Result<()> {
    match result {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
