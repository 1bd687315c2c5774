//! Ask command handler: one-shot triage question.

use clap::Args;
use pedisafe_core::{config::AppConfig, AppResult};
use pedisafe_triage::{detect_level, TriageEngine};

/// One-shot triage question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The caregiver message (age, temperature, symptoms)
    pub message: String,

    /// Output the response and signal as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        config.validate()?;

        let mut engine = TriageEngine::new(config.clone()).await?;
        let signal = engine.check(&self.message);
        let response = engine.send(&self.message).await?;

        if self.json {
            let level = detect_level(&response).map(|l| l.emoji());
            let output = serde_json::json!({
                "response": response,
                "signal": signal,
                "level": level,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{response}");
        }

        Ok(())
    }
}
