//! Chat command handler: interactive triage conversation.

use std::io::{BufRead, Write};

use clap::Args;
use pedisafe_core::{config::AppConfig, AppError, AppResult, GenerationErrorKind, ProviderKind};
use pedisafe_triage::TriageEngine;

/// Interactive triage conversation
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        config.validate()?;

        println!("Loading medical knowledge base...");
        let mut engine = TriageEngine::new(config.clone()).await?;
        let stats = engine.stats();
        println!(
            "Ready: {} guideline documents, {} chunks indexed.",
            stats.documents_count, stats.chunks_count
        );
        println!("Describe your child's situation (age, temperature, symptoms).");
        println!("Commands: /reset, /provider <openai|cerebras>, /exit\n");

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("you> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let message = line.trim();
            if message.is_empty() {
                continue;
            }

            match message {
                "/exit" | "/quit" => break,
                "/reset" => {
                    engine.reset();
                    println!("Conversation cleared.\n");
                    continue;
                }
                _ if message.starts_with("/provider") => {
                    self.handle_provider_switch(&mut engine, message).await;
                    continue;
                }
                _ => {}
            }

            match engine.send(message).await {
                Ok(response) => println!("\npedisafe> {response}\n"),
                Err(e) => println!("\n{}\n", user_facing_error(&e)),
            }
        }

        Ok(())
    }

    async fn handle_provider_switch(&self, engine: &mut TriageEngine, message: &str) {
        let name = message.trim_start_matches("/provider").trim();
        let Some(kind) = ProviderKind::parse(name) else {
            println!("Unknown provider '{name}'. Supported: openai, cerebras.\n");
            return;
        };

        println!("Switching to {} and rebuilding the index...", kind.as_str());
        match engine.switch_provider(kind).await {
            Ok(stats) => println!(
                "Done: {} chunks re-indexed.\n",
                stats.chunks_count
            ),
            Err(e) => println!("{}\n", user_facing_error(&e)),
        }
    }
}

/// Map errors to actionable guidance instead of raw provider text.
fn user_facing_error(error: &AppError) -> String {
    match error {
        AppError::Generation { kind, .. } => match kind {
            GenerationErrorKind::QuotaExceeded => {
                "Provider quota exhausted. Switch credentials or try /provider cerebras."
                    .to_string()
            }
            GenerationErrorKind::InvalidCredential => {
                "Invalid API key. Check the provider's environment variable or pass --api-key."
                    .to_string()
            }
            GenerationErrorKind::Timeout => {
                "The provider timed out. Please try again.".to_string()
            }
            GenerationErrorKind::Other => format!("Generation failed: {error}"),
        },
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_maps_to_guidance() {
        let err = AppError::generation(GenerationErrorKind::QuotaExceeded, "429");
        assert!(user_facing_error(&err).contains("quota"));
    }

    #[test]
    fn test_credential_error_maps_to_guidance() {
        let err = AppError::generation(GenerationErrorKind::InvalidCredential, "401");
        assert!(user_facing_error(&err).contains("--api-key"));
    }
}
