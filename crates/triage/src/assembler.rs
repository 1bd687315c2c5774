//! Response post-processing.
//!
//! The prompt contract asks the model for a level marker, action steps,
//! sources and a disclaimer, but compliance is not guaranteed. This layer
//! backfills the sources section and the disclaimer when missing. It never
//! errors; generated text passes through otherwise unchanged.

use pedisafe_knowledge::{citation, Chunk};
use pedisafe_prompt::{disclaimer, sources_heading, Language};

/// Finalize a generated response.
pub fn finalize(raw_text: &str, chunks: &[Chunk], language: Language) -> String {
    let mut text = raw_text.trim_end().to_string();

    if !has_sources_section(&text, language) {
        if let Some(sources) = render_sources(chunks, language) {
            text.push_str("\n\n");
            text.push_str(&sources);
        }
    }

    if !contains_disclaimer_marker(&text, language) {
        text.push_str("\n\n");
        text.push_str(disclaimer(language));
    }

    text
}

fn has_sources_section(text: &str, language: Language) -> bool {
    text.contains(sources_heading(language))
        || text.contains("Medical Sources")
        || text.contains("Fuentes Médicas")
}

fn contains_disclaimer_marker(text: &str, language: Language) -> bool {
    match language {
        Language::En => text.contains("does not replace"),
        Language::Es => text.contains("no reemplaza"),
    }
}

/// Render a deduplicated sources section from the retrieved chunks.
/// `None` when no chunks backed the response.
fn render_sources(chunks: &[Chunk], language: Language) -> Option<String> {
    if chunks.is_empty() {
        return None;
    }

    let mut seen = Vec::new();
    for chunk in chunks {
        let entry = citation(&chunk.source_path).to_markdown();
        if !seen.contains(&entry) {
            seen.push(entry);
        }
    }

    let mut section = String::from(sources_heading(language));
    for entry in seen {
        section.push_str("\n- ");
        section.push_str(&entry);
    }
    Some(section)
}
