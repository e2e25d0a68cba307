use async_trait::async_trait;

use crate::error::{AdvisorError, Result};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model identifier
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// A text generation backend.
///
/// One call per user action, no retries. Implementations return the model's text untouched and
/// map every transport or service failure to [`AdvisorError::Generation`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Reject an absent or blank credential before anything is configured.
pub fn check_credential(credential: Option<&str>) -> Result<&str> {
    match credential {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(AdvisorError::MissingCredential(GEMINI_API_KEY_VAR.to_string())),
    }
}

#[cfg(feature = "rig")]
pub use gemini_client::GeminiClient;

#[cfg(feature = "rig")]
mod gemini_client {
    use async_trait::async_trait;
    use rig::{agent::Agent, client::CompletionClient, completion::Prompt, providers::gemini};
    use serde_json::json;
    use tracing::{debug, error, info};

    use super::{DEFAULT_MODEL, TextGenerator, check_credential};
    use crate::error::{AdvisorError, Result};

    /// Gemini-backed generator built on rig's Gemini provider
    pub struct GeminiClient {
        agent: Agent<gemini::completion::CompletionModel>,
        model: String,
    }

    impl GeminiClient {
        /// Configure a client for the default model.
        pub fn configure(credential: Option<&str>) -> Result<Self> {
            Self::with_model(credential, DEFAULT_MODEL)
        }

        pub fn with_model(credential: Option<&str>, model: &str) -> Result<Self> {
            let api_key = check_credential(credential)?;
            Ok(Self::with_client(&gemini::Client::new(api_key), model))
        }

        fn with_client(client: &gemini::Client, model: &str) -> Self {
            // The provider requires a `generationConfig` object, even an empty one
            let agent = client
                .agent(model)
                .additional_params(json!({ "generationConfig": {} }))
                .build();

            info!(model = %model, "Configured Gemini client");
            Self {
                agent,
                model: model.to_string(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for GeminiClient {
        fn model(&self) -> &str {
            &self.model
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            debug!(model = %self.model, prompt_len = prompt.len(), "Sending prompt to Gemini");

            let response = self.agent.prompt(prompt.to_string()).await.map_err(|e| {
                error!(model = %self.model, error = %e, "Gemini request failed");
                AdvisorError::Generation(e.to_string())
            })?;

            debug!(model = %self.model, response_len = response.len(), "Gemini responded");
            Ok(response)
        }
    }

}
