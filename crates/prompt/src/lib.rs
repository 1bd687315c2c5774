//! PediSafe Prompt Library
//!
//! Bilingual prompt texts and the composer that turns retrieved chunks,
//! conversation history and the caregiver message into a generation-ready
//! payload.

pub mod composer;
pub mod locales;
pub mod types;

pub use composer::{compose, format_fragments};
pub use locales::{
    disclaimer, rag_template, red_flag_alert, sources_heading, system_prompt, Language,
};
pub use types::{ConversationTurn, PromptPayload, Role};
