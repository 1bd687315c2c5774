//! CLI command handlers.

mod ask;
mod chat;
mod check;
mod sources;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use check::CheckCommand;
pub use sources::SourcesCommand;
