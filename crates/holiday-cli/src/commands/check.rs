use super::{create_assistant, print_answer, print_text};
use holiday_agent::HolidayEntry;
use holiday_core::Config;

pub enum Candidate {
    /// Asked in words; the model compares.
    Question(String),
    /// Compared here by exact date and name.
    Entry { date: String, name: String },
}

pub async fn run(
    config: &Config,
    session_id: &str,
    list_question: &str,
    candidate: Candidate,
    raw: bool,
) -> anyhow::Result<()> {
    let assistant = create_assistant(config)?;

    match candidate {
        Candidate::Question(question) if raw => print_text(
            assistant
                .check_new_holiday(session_id, list_question, &question)
                .await,
        ),
        Candidate::Question(question) => print_answer(
            assistant
                .check_new_holiday_typed(session_id, list_question, &question)
                .await,
        ),
        Candidate::Entry { date, name } => print_answer(
            assistant
                .check_candidate(session_id, list_question, &HolidayEntry::new(date, name))
                .await,
        ),
    }
}
