//! The triage engine: classify, retrieve, compose, generate, finalize.
//!
//! One engine owns one conversation session, one knowledge index and one
//! generation client. Requests run sequentially; the index is immutable
//! after construction, so switching providers rebuilds it explicitly.

use std::sync::Arc;

use pedisafe_core::{AppConfig, AppError, AppResult, ProviderKind};
use pedisafe_knowledge::{
    build_index, create_provider, BuildStats, RecursiveSplitter, Retriever, RetrieverConfig,
};
use pedisafe_llm::{create_client, LlmClient, LlmRequest};
use pedisafe_prompt::{compose, ConversationTurn, Language};

use crate::assembler::finalize;
use crate::classifier::{classify, TriageSignal};
use crate::session::Session;

pub struct TriageEngine {
    config: AppConfig,
    language: Language,
    retriever: Retriever,
    llm: Arc<dyn LlmClient>,
    session: Session,
    stats: BuildStats,
}

impl TriageEngine {
    /// Build an engine for the configured provider: embed the knowledge
    /// directory, bind the retriever and create the generation client.
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let language = Language::parse(&config.language)?;
        let profile = config.active_profile();
        let api_key = config.resolve_api_key().ok_or_else(|| {
            AppError::Config(format!(
                "No API key found. Set {} or pass --api-key",
                profile.api_key_env
            ))
        })?;

        let embedder = create_provider(&profile, Some(&api_key))?;
        let splitter = RecursiveSplitter::default();
        let kb = build_index(&config.knowledge_dir, embedder.clone(), &splitter).await?;
        let retriever = Retriever::new(kb.index, embedder, RetrieverConfig::default())?;
        let llm = create_client(&profile, &api_key)?;

        tracing::info!(
            provider = profile.kind.as_str(),
            model = %profile.model,
            chunks = kb.stats.chunks_count,
            "Triage engine ready"
        );

        Ok(Self {
            config,
            language,
            retriever,
            llm,
            session: Session::new(),
            stats: kb.stats,
        })
    }

    /// Process one caregiver message and return the final assistant text.
    pub async fn send(&mut self, message: &str) -> AppResult<String> {
        let signal = classify(message);
        if signal.is_red_flag {
            tracing::warn!(
                flag = signal.red_flag_matched.as_deref().unwrap_or(""),
                "Red flag detected"
            );
        }

        // Retrieval runs on the raw message; the alert prefix is a prompt
        // construct, not a search term.
        let chunks = self.retriever.retrieve(message).await?;

        let payload = compose(
            signal.red_flag_matched.as_deref(),
            &chunks,
            self.session.window(),
            message,
            self.language,
        )?;

        let request = LlmRequest::new(payload.system, payload.user);
        let response = self.llm.complete(&request).await?;

        let final_text = finalize(&response.content, &chunks, self.language);

        self.session.push(ConversationTurn::user(message));
        self.session.push(ConversationTurn::assistant(&final_text));

        Ok(final_text)
    }

    /// Classify a message without generating a response.
    pub fn check(&self, message: &str) -> TriageSignal {
        classify(message)
    }

    /// Full conversation history, oldest first.
    pub fn history(&self) -> &[ConversationTurn] {
        self.session.history()
    }

    /// Clear the conversation. The knowledge index stays.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Knowledge-base build statistics.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the active provider, rebuilding the index with the new
    /// embedding backend. The conversation history is kept.
    pub async fn switch_provider(&mut self, kind: ProviderKind) -> AppResult<&BuildStats> {
        self.config.provider = kind;
        let profile = self.config.active_profile();
        let api_key = self.config.resolve_api_key().ok_or_else(|| {
            AppError::Config(format!(
                "No API key found for provider '{}'. Set {}",
                kind.as_str(),
                profile.api_key_env
            ))
        })?;

        tracing::info!(provider = kind.as_str(), "Switching provider, rebuilding index");

        let embedder = create_provider(&profile, Some(&api_key))?;
        let splitter = RecursiveSplitter::default();
        let kb = build_index(&self.config.knowledge_dir, embedder.clone(), &splitter).await?;
        self.retriever = Retriever::new(kb.index, embedder, RetrieverConfig::default())?;
        self.llm = create_client(&profile, &api_key)?;
        self.stats = kb.stats;

        Ok(&self.stats)
    }
}
