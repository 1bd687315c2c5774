//! PediSafe CLI
//!
//! Command-line interface for informational pediatric fever triage.
//! Retrieval-augmented answers over public clinical guidelines with a
//! deterministic red-flag safety layer.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, CheckCommand, SourcesCommand};
use pedisafe_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// PediSafe CLI - informational pediatric fever triage
#[derive(Parser, Debug)]
#[command(name = "pedisafe")]
#[command(about = "Informational pediatric fever triage assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Generation provider (openai, cerebras)
    #[arg(short, long, global = true, env = "PEDISAFE_PROVIDER")]
    provider: Option<String>,

    /// Chat model override
    #[arg(short, long, global = true, env = "PEDISAFE_MODEL")]
    model: Option<String>,

    /// Directory of guideline markdown files
    #[arg(short, long, global = true, env = "PEDISAFE_KNOWLEDGE_DIR")]
    knowledge_dir: Option<PathBuf>,

    /// Response language (en, es)
    #[arg(short, long, global = true, env = "PEDISAFE_LANGUAGE")]
    language: Option<String>,

    /// API key override (prefer the provider's environment variable)
    #[arg(long, global = true, env = "PEDISAFE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive triage conversation
    Chat(ChatCommand),

    /// One-shot triage question
    Ask(AskCommand),

    /// Run only the deterministic red-flag classifier on a message
    Check(CheckCommand),

    /// List the loaded guideline sources
    Sources(SourcesCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?.with_overrides(
        cli.provider,
        cli.model,
        cli.knowledge_dir,
        cli.language,
        cli.api_key,
        cli.log_level,
        cli.no_color,
    )?;

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!(
        provider = config.provider.as_str(),
        language = %config.language,
        knowledge_dir = %config.knowledge_dir.display(),
        "PediSafe CLI starting"
    );

    let command_name = match &cli.command {
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
        Commands::Check(_) => "check",
        Commands::Sources(_) => "sources",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Check(cmd) => cmd.execute(),
        Commands::Sources(cmd) => cmd.execute(&config),
    };

    if let Err(ref e) = result {
        tracing::error!("Command failed: {}", e);
    }

    result
}
