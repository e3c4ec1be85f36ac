//! Holiday listing, from model knowledge and with the lookup tool
//!
//! Run with: cargo run --example list_holidays

use holiday::llm::OpenAiProvider;
use holiday::tools::{CalendarificClient, HolidayLookup};
use holiday::{AgentConfig, HolidayAssistant};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable required");
    let calendar_key = std::env::var("CALENDARIFIC_API_KEY")
        .expect("CALENDARIFIC_API_KEY environment variable required");

    let llm = Arc::new(OpenAiProvider::new(api_key));
    let lookup = Arc::new(HolidayLookup::new(Arc::new(CalendarificClient::new(
        calendar_key,
    )?)));

    let assistant = HolidayAssistant::new(llm, lookup, AgentConfig::default())?;

    let question = "What are the national holidays in Taiwan in October 2024?";

    // Model knowledge only
    let answer = assistant.list_holidays_typed(question).await?;
    println!("From the model:");
    for entry in &answer.result {
        println!("  {}  {}", entry.date, entry.name);
    }

    // Model with the get_holidays tool
    let answer = assistant.list_holidays_with_tools_typed(question).await?;
    println!("\nFrom the lookup:");
    for entry in &answer.result {
        println!("  {}  {}", entry.date, entry.name);
    }

    Ok(())
}
