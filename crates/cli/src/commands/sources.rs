//! Sources command handler: list the loaded guideline files.

use clap::Args;
use pedisafe_core::{config::AppConfig, AppResult};
use pedisafe_knowledge::{citation, list_sources};
use std::path::PathBuf;

/// List the loaded guideline sources
#[derive(Args, Debug)]
pub struct SourcesCommand {
    /// Show titles and URLs from the attribution map
    #[arg(long)]
    pub detailed: bool,
}

impl SourcesCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let names = list_sources(&config.knowledge_dir)?;

        for name in names {
            if self.detailed {
                let c = citation(&PathBuf::from(&name));
                match c.url {
                    Some(url) => println!("{name}: {} <{url}>", c.title),
                    None => println!("{name}: (no attribution)"),
                }
            } else {
                println!("{name}");
            }
        }

        Ok(())
    }
}
