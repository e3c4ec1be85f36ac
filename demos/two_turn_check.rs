//! Two turns in one session: list, then ask about a new holiday
//!
//! Run with: cargo run --example two_turn_check

use holiday::agent::HolidayEntry;
use holiday::llm::OpenAiProvider;
use holiday::tools::{CalendarificClient, HolidayLookup};
use holiday::{AgentConfig, HolidayAssistant};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable required");
    let calendar_key = std::env::var("CALENDARIFIC_API_KEY")
        .expect("CALENDARIFIC_API_KEY environment variable required");

    let llm = Arc::new(OpenAiProvider::new(api_key));
    let lookup = Arc::new(HolidayLookup::new(Arc::new(CalendarificClient::new(
        calendar_key,
    )?)));
    let assistant = HolidayAssistant::new(llm, lookup, AgentConfig::default())?;

    let list_question = "What are the national holidays in Taiwan in October 2024?";

    // The model compares
    let answer = assistant
        .check_new_holiday(
            "demo",
            list_question,
            "According to my calendar, 2024-10-10 is National Day. Is it in that list?",
        )
        .await?;
    println!("Model decision: {}", answer);

    // Compared locally by date and name
    let decision = assistant
        .check_candidate(
            "demo",
            list_question,
            &HolidayEntry::new("2024-10-31", "Halloween"),
        )
        .await?;
    println!("Exact-match decision: add = {}", decision.result.add);

    let session = assistant.sessions().get("demo").await;
    if let Some(session) = session {
        println!("Session holds {} messages", session.stats().message_count);
    }

    assistant.end_session("demo").await;

    Ok(())
}
