use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "holiday")]
#[command(author, version, about = "Holiday lookup assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(clap::Args)]
pub struct GlobalArgs {
    /// Config file (default: ./holiday.toml, ~/.holiday/config.toml, ~/.config/holiday/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model API key; overrides OPENAI_API_KEY / AZURE_OPENAI_API_KEY
    #[arg(short, long, global = true)]
    api_key: Option<String>,

    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Calendarific API key; overrides CALENDARIFIC_API_KEY
    #[arg(long, global = true)]
    calendar_key: Option<String>,

    /// Print the normalized model text without validating it
    #[arg(long, global = true)]
    raw: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List holidays from the model's own knowledge
    List {
        question: String,
    },
    /// List holidays, letting the model look them up
    Ask {
        question: String,
    },
    /// Look holidays up directly, e.g. "TW,2024"
    Lookup {
        query: String,
    },
    /// List holidays, then ask whether another one should be added
    Check {
        list_question: String,
        /// Follow-up question; the model decides
        candidate_question: Option<String>,
        /// Candidate date (YYYY-MM-DD); with --name, decided by exact match
        #[arg(long, requires = "name")]
        date: Option<String>,
        #[arg(long, requires = "date")]
        name: Option<String>,
        #[arg(short, long, default_value = "default")]
        session: String,
    },
    /// Read a score off an image
    Score {
        question: String,
        #[arg(short, long)]
        image: PathBuf,
    },
    /// Start an interactive chat session
    Chat {
        #[arg(short, long)]
        session: Option<String>,
    },
}

fn init_tracing(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(&cli.global)?;
    init_tracing(cli.global.verbose, config.general.log_level.as_str());

    let raw = cli.global.raw;

    match cli.command {
        Commands::List { question } => {
            commands::list::run(&config, &question, false, raw).await?;
        }
        Commands::Ask { question } => {
            commands::list::run(&config, &question, true, raw).await?;
        }
        Commands::Lookup { query } => {
            commands::lookup::run(&config, &query).await?;
        }
        Commands::Check {
            list_question,
            candidate_question,
            date,
            name,
            session,
        } => {
            let candidate = match (candidate_question, date, name) {
                (_, Some(date), Some(name)) => commands::check::Candidate::Entry { date, name },
                (Some(question), _, _) => commands::check::Candidate::Question(question),
                _ => anyhow::bail!("give a candidate question, or --date and --name"),
            };
            commands::check::run(&config, &session, &list_question, candidate, raw).await?;
        }
        Commands::Score { question, image } => {
            commands::score::run(&config, &question, &image, raw).await?;
        }
        Commands::Chat { session } => {
            commands::chat::run(&config, session).await?;
        }
    }

    Ok(())
}
