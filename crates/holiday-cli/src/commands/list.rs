use super::{create_assistant, print_answer, print_text};
use holiday_core::Config;

pub async fn run(config: &Config, question: &str, tools: bool, raw: bool) -> anyhow::Result<()> {
    let assistant = create_assistant(config)?;

    match (tools, raw) {
        (false, true) => print_text(assistant.list_holidays(question).await),
        (false, false) => print_answer(assistant.list_holidays_typed(question).await),
        (true, true) => print_text(assistant.list_holidays_with_tools(question).await),
        (true, false) => print_answer(assistant.list_holidays_with_tools_typed(question).await),
    }
}
