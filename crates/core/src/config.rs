//! Configuration management for PediSafe.
//!
//! Configuration is merged from three sources, lowest precedence first:
//! - Built-in defaults (OpenAI profile, English, `knowledge/` directory)
//! - A YAML config file (`pedisafe.yaml` next to the knowledge directory)
//! - Environment variables, then CLI flags
//!
//! Credentials are resolved from the environment (or an explicit override)
//! and are never written to the config file or to the logs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Known generation/embedding provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI: commercial default, has its own embedding models.
    OpenAi,
    /// Cerebras: free-tier alternative with an OpenAI-compatible API.
    /// Has no embedding endpoint; embeddings fall back to the local
    /// trigram method.
    Cerebras,
}

impl ProviderKind {
    /// Parse a provider identifier from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "cerebras" => Some(Self::Cerebras),
            _ => None,
        }
    }

    /// Canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Cerebras => "cerebras",
        }
    }
}

/// A fully resolved provider profile: everything the generation adapter and
/// the embedding factory need, minus the credential itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Which backend this profile targets
    pub kind: ProviderKind,

    /// Chat model identifier (e.g., "gpt-4o-mini", "llama-3.3-70b")
    pub model: String,

    /// API base URL (OpenAI-compatible endpoints)
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: String,

    /// Embedding model, when the provider has one. `None` selects the
    /// local trigram embedding fallback.
    #[serde(rename = "embeddingModel")]
    pub embedding_model: Option<String>,

    /// Request timeout for generation calls, in seconds
    #[serde(rename = "timeoutSecs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl ProviderProfile {
    /// Built-in OpenAI profile.
    pub fn openai() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            embedding_model: Some("text-embedding-3-small".to_string()),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Built-in Cerebras profile (OpenAI-compatible, no embeddings).
    pub fn cerebras() -> Self {
        Self {
            kind: ProviderKind::Cerebras,
            model: "llama-3.3-70b".to_string(),
            endpoint: "https://api.cerebras.ai/v1".to_string(),
            api_key_env: "CEREBRAS_API_KEY".to_string(),
            embedding_model: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Built-in profile for a provider kind.
    pub fn builtin(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::OpenAi => Self::openai(),
            ProviderKind::Cerebras => Self::cerebras(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Active provider
    pub provider: ProviderKind,

    /// Chat model override (defaults to the profile's model)
    pub model: Option<String>,

    /// Directory of guideline markdown files
    pub knowledge_dir: PathBuf,

    /// Response language: "en" (primary) or "es" (secondary)
    pub language: String,

    /// Explicit API key override (BYOK). Checked before the profile's
    /// environment variable. Never logged, never serialized.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Disable colored output
    pub no_color: bool,

    /// Provider profile overrides from the config file, keyed by name
    #[serde(default)]
    pub providers: HashMap<String, ProviderProfile>,
}

/// Config file structure (`pedisafe.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "knowledgeDir")]
    knowledge_dir: Option<String>,
    language: Option<String>,
    providers: Option<HashMap<String, ProviderProfile>>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            model: None,
            knowledge_dir: PathBuf::from("knowledge"),
            language: "en".to_string(),
            api_key: None,
            config_file: None,
            log_level: None,
            no_color: false,
            providers: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `PEDISAFE_CONFIG`: path to config file (default `pedisafe.yaml`)
    /// - `PEDISAFE_PROVIDER`: provider name ("openai", "cerebras")
    /// - `PEDISAFE_MODEL`: chat model override
    /// - `PEDISAFE_KNOWLEDGE_DIR`: knowledge directory
    /// - `PEDISAFE_LANGUAGE`: "en" or "es"
    /// - `PEDISAFE_API_KEY`: explicit credential override
    /// - `RUST_LOG`, `NO_COLOR`: logging behavior
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("PEDISAFE_CONFIG") {
            config.config_file = Some(PathBuf::from(path));
        }

        // Merge YAML config file if present
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("pedisafe.yaml"));
        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        }

        // Environment variables override the file
        if let Ok(provider) = std::env::var("PEDISAFE_PROVIDER") {
            config.provider = ProviderKind::parse(&provider).ok_or_else(|| {
                AppError::Config(format!("Unknown provider in PEDISAFE_PROVIDER: {provider}"))
            })?;
        }

        if let Ok(model) = std::env::var("PEDISAFE_MODEL") {
            config.model = Some(model);
        }

        if let Ok(dir) = std::env::var("PEDISAFE_KNOWLEDGE_DIR") {
            config.knowledge_dir = PathBuf::from(dir);
        }

        if let Ok(language) = std::env::var("PEDISAFE_LANGUAGE") {
            config.language = language;
        }

        config.api_key = std::env::var("PEDISAFE_API_KEY").ok();
        if config.log_level.is_none() {
            config.log_level = std::env::var("RUST_LOG").ok();
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(provider) = file.provider {
            self.provider = ProviderKind::parse(&provider).ok_or_else(|| {
                AppError::Config(format!("Unknown provider in config file: {provider}"))
            })?;
        }
        if let Some(model) = file.model {
            self.model = Some(model);
        }
        if let Some(dir) = file.knowledge_dir {
            self.knowledge_dir = PathBuf::from(dir);
        }
        if let Some(language) = file.language {
            self.language = language;
        }
        if let Some(providers) = file.providers {
            self.providers = providers;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(())
    }

    /// Apply CLI overrides, giving them precedence over file and env.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        knowledge_dir: Option<PathBuf>,
        language: Option<String>,
        api_key: Option<String>,
        log_level: Option<String>,
        no_color: bool,
    ) -> AppResult<Self> {
        if let Some(provider) = provider {
            self.provider = ProviderKind::parse(&provider)
                .ok_or_else(|| AppError::Config(format!("Unknown provider: {provider}")))?;
        }
        if let Some(model) = model {
            self.model = Some(model);
        }
        if let Some(dir) = knowledge_dir {
            self.knowledge_dir = dir;
        }
        if let Some(language) = language {
            self.language = language;
        }
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }
        if no_color {
            self.no_color = true;
        }

        Ok(self)
    }

    /// Resolve the active provider profile, applying the model override.
    pub fn active_profile(&self) -> ProviderProfile {
        let mut profile = self
            .providers
            .get(self.provider.as_str())
            .cloned()
            .unwrap_or_else(|| ProviderProfile::builtin(self.provider));
        profile.kind = self.provider;

        if let Some(ref model) = self.model {
            profile.model = model.clone();
        }

        profile
    }

    /// Resolve the API key: explicit override first, then the profile's
    /// environment variable. `None` means no credential is available.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }
        std::env::var(&self.active_profile().api_key_env).ok()
    }

    /// Validate the configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        if self.language != "en" && self.language != "es" {
            return Err(AppError::Config(format!(
                "Unsupported language: {}. Supported: en, es",
                self.language
            )));
        }

        if !self.knowledge_dir.exists() {
            return Err(AppError::Config(format!(
                "Knowledge directory does not exist: {:?}",
                self.knowledge_dir
            )));
        }

        if self.resolve_api_key().is_none() {
            let profile = self.active_profile();
            return Err(AppError::Config(format!(
                "No API key found. Set {} or pass --api-key",
                profile.api_key_env
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.language, "en");
        assert!(config.model.is_none());
        assert!(!config.no_color);
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!(ProviderKind::parse("openai"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("cerebras"), Some(ProviderKind::Cerebras));
        assert_eq!(ProviderKind::parse("unknown"), None);
    }

    #[test]
    fn test_active_profile_model_override() {
        let config = AppConfig {
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        let profile = config.active_profile();
        assert_eq!(profile.model, "gpt-4o");
        assert_eq!(profile.kind, ProviderKind::OpenAi);
        assert!(profile.embedding_model.is_some());
    }

    #[test]
    fn test_cerebras_profile_has_no_embedding_model() {
        let config = AppConfig {
            provider: ProviderKind::Cerebras,
            ..Default::default()
        };
        let profile = config.active_profile();
        assert_eq!(profile.endpoint, "https://api.cerebras.ai/v1");
        assert!(profile.embedding_model.is_none());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default()
            .with_overrides(
                Some("cerebras".to_string()),
                Some("llama-3.1-8b".to_string()),
                None,
                Some("es".to_string()),
                None,
                Some("debug".to_string()),
                true,
            )
            .unwrap();

        assert_eq!(config.provider, ProviderKind::Cerebras);
        assert_eq!(config.model, Some("llama-3.1-8b".to_string()));
        assert_eq!(config.language, "es");
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert!(config.no_color);
    }

    #[test]
    fn test_with_overrides_unknown_provider() {
        let result = AppConfig::default().with_overrides(
            Some("mistral".to_string()),
            None,
            None,
            None,
            None,
            None,
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_unsupported_language() {
        let config = AppConfig {
            language: "fr".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pedisafe.yaml");
        std::fs::write(
            &path,
            r#"
provider: cerebras
language: es
knowledgeDir: guidelines
logging:
  level: debug
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.merge_yaml(&path).unwrap();

        assert_eq!(config.provider, ProviderKind::Cerebras);
        assert_eq!(config.language, "es");
        assert_eq!(config.knowledge_dir, PathBuf::from("guidelines"));
        assert_eq!(config.log_level, Some("debug".to_string()));
    }
}
