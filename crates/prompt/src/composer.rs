//! Prompt composition.
//!
//! Assembles the final system and user prompts from retrieved chunks, the
//! conversation history window and the caregiver message. When the
//! deterministic classifier found a red flag, the message is prefixed with
//! an alert line so the model escalates even if retrieval missed it.

use handlebars::Handlebars;
use serde_json::json;

use pedisafe_core::{AppError, AppResult};
use pedisafe_knowledge::{citation, Chunk};

use crate::locales::{self, Language};
use crate::types::{ConversationTurn, PromptPayload, Role};

/// Separator between context fragments in the rendered prompt.
const FRAGMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Compose the prompt payload for one caregiver message.
///
/// `red_flag` carries the matched vocabulary entry when the classifier
/// fired. An empty chunk slice renders an empty context block; the system
/// prompt then instructs the model to say it does not know for certain.
pub fn compose(
    red_flag: Option<&str>,
    chunks: &[Chunk],
    history: &[ConversationTurn],
    message: &str,
    language: Language,
) -> AppResult<PromptPayload> {
    let context = format_fragments(chunks);
    let chat_history = format_history(history, language);

    let user_message = match red_flag {
        Some(flag) => locales::red_flag_alert(language, flag, message),
        None => message.to_string(),
    };

    let handlebars = Handlebars::new();
    let user = handlebars
        .render_template(
            locales::rag_template(language),
            &json!({
                "context": context,
                "chat_history": chat_history,
                "user_message": user_message,
            }),
        )
        .map_err(|e| AppError::Prompt(format!("Template render failed: {e}")))?;

    Ok(PromptPayload {
        system: locales::system_prompt(language).to_string(),
        user,
    })
}

/// Render retrieved chunks as numbered, attributed fragments.
pub fn format_fragments(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let source = citation(&chunk.source_path).to_markdown();
            format!("[Fragment {}] Source: {}\n{}", i + 1, source, chunk.text)
        })
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Render the history window as labeled lines.
fn format_history(history: &[ConversationTurn], language: Language) -> String {
    history
        .iter()
        .map(|turn| {
            let label = match (turn.role, language) {
                (Role::User, Language::En) => "User",
                (Role::User, Language::Es) => "Usuario",
                (Role::Assistant, _) => "PediSafe",
            };
            format!("{label}: {}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
