use colored::Colorize;
use holiday_core::Id;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::create_assistant;
use holiday_core::Config;

pub async fn run(config: &Config, session: Option<String>) -> anyhow::Result<()> {
    let assistant = create_assistant(config)?;
    let session_id = session.unwrap_or_else(|| Id::new().to_string());

    println!("{}", "Holiday assistant".green().bold());
    println!("Session {}", session_id.dimmed());
    println!("Type {} to exit, {} to start over\n", "quit".yellow(), "reset".yellow());

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".cyan().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" || line == "exit" {
                    println!("{}", "Goodbye!".green());
                    break;
                }
                if line == "reset" {
                    assistant.end_session(&session_id).await;
                    println!("{}\n", "History cleared.".yellow());
                    continue;
                }

                rl.add_history_entry(line)?;

                print!("{} ", "Assistant:".magenta().bold());

                match assistant.chat(&session_id, line).await {
                    Ok(response) => {
                        println!("{}\n", response);
                    }
                    Err(e) => {
                        println!("{} {}\n", "Error:".red().bold(), e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                println!("{} {:?}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}
