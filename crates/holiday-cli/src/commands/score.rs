use super::{create_assistant, print_answer, print_text};
use holiday_core::{Config, ImageContent};
use std::path::Path;

pub async fn run(config: &Config, question: &str, image: &Path, raw: bool) -> anyhow::Result<()> {
    let image = ImageContent::from_file(image)?;
    let assistant = create_assistant(config)?;

    if raw {
        print_text(assistant.read_score(question, image).await)
    } else {
        print_answer(assistant.read_score_typed(question, image).await)
    }
}
