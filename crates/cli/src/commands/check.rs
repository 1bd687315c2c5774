//! Check command handler: deterministic classifier only, no model call.

use clap::Args;
use pedisafe_core::AppResult;
use pedisafe_triage::classify;

/// Run only the deterministic red-flag classifier on a message
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// The caregiver message to classify
    pub message: String,

    /// Output the signal as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn execute(&self) -> AppResult<()> {
        let signal = classify(&self.message);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&signal)?);
            return Ok(());
        }

        match &signal.age_months {
            Some(age) => println!("age: {age} months"),
            None => println!("age: not found"),
        }
        match &signal.temperature_celsius {
            Some(temp) => println!("temperature: {temp}°C"),
            None => println!("temperature: not found"),
        }
        match &signal.red_flag_matched {
            Some(flag) => println!("red flag: {flag}"),
            None => println!("red flag: none"),
        }

        Ok(())
    }
}
