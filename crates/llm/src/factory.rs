//! Client construction from provider profiles.

use std::sync::Arc;

use pedisafe_core::{AppError, AppResult, ProviderProfile};

use crate::client::LlmClient;
use crate::providers::openai_compat::OpenAiCompatClient;

/// Build the generation client for a provider profile.
///
/// Every supported profile is OpenAI-compatible today; this is the seam
/// where a genuinely different wire format would get its own client.
pub fn create_client(profile: &ProviderProfile, api_key: &str) -> AppResult<Arc<dyn LlmClient>> {
    if api_key.is_empty() {
        return Err(AppError::Config(format!(
            "Empty API key for provider '{}' (set {})",
            profile.kind.as_str(),
            profile.api_key_env
        )));
    }

    let client = OpenAiCompatClient::new(
        profile.kind.as_str(),
        &profile.endpoint,
        &profile.model,
        api_key,
        profile.timeout_secs,
    )?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_for_each_builtin() {
        let openai = create_client(&ProviderProfile::openai(), "sk-test").unwrap();
        assert_eq!(openai.provider_name(), "openai");

        let cerebras = create_client(&ProviderProfile::cerebras(), "csk-test").unwrap();
        assert_eq!(cerebras.provider_name(), "cerebras");
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = create_client(&ProviderProfile::openai(), "");
        assert!(result.is_err());
    }
}
