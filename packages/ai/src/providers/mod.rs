//! Generative provider abstraction and implementations.
//!
//! Supports Google Gemini and any `OpenAI`-compatible server via a
//! common trait. Both are driven in structured-output mode: the caller
//! supplies a response schema and gets back raw JSON text to parse.

pub mod gemini;
pub mod openai;

use crate::AiError;

/// Trait for generative text providers operating in JSON mode.
#[async_trait::async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Sends a single-turn prompt and returns the raw JSON text of the
    /// response.
    ///
    /// `schema` describes the expected response shape in the Gemini
    /// `responseSchema` dialect; providers that cannot enforce a schema
    /// (the `OpenAI` JSON mode) may ignore it, in which case the caller's
    /// own validation is the only guard.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails or the provider returns
    /// no usable text.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, AiError>;
}

/// Creates a generative provider based on environment variables.
///
/// If `AI_PROVIDER` is explicitly set, uses that provider. Otherwise
/// auto-detects from available credentials:
///
/// 1. `GEMINI_API_KEY` set -> Gemini
/// 2. `OPENAI_API_KEY` set -> `OpenAI` (or a compatible server when
///    `AI_BASE_URL` points elsewhere)
///
/// The model can be overridden with `AI_MODEL`.
///
/// # Errors
///
/// Returns [`AiError::Config`] if no credentials are found or the
/// explicitly requested provider is not configured.
pub fn create_provider_from_env() -> Result<Box<dyn GenerativeProvider>, AiError> {
    let provider = std::env::var("AI_PROVIDER").unwrap_or_else(|_| detect_provider());

    match provider.to_lowercase().as_str() {
        "gemini" | "google" => {
            let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::Config {
                message: "GEMINI_API_KEY environment variable not set".to_string(),
            })?;
            let model =
                std::env::var("AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
            Ok(Box::new(gemini::GeminiProvider::new(api_key, model)))
        }
        "openai" | "gpt" => {
            let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| AiError::Config {
                message: "OPENAI_API_KEY environment variable not set".to_string(),
            })?;
            let model = std::env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
            let base_url = std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
            Ok(Box::new(openai::OpenAiProvider::new(
                api_key, model, base_url,
            )))
        }
        other => Err(AiError::Config {
            message: format!("Unknown AI provider: {other}. Use 'gemini' or 'openai'."),
        }),
    }
}

/// Auto-detects which provider to use based on available credentials.
///
/// Returns a provider name string that matches the arms in
/// [`create_provider_from_env`].
fn detect_provider() -> String {
    if std::env::var("GEMINI_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Gemini (GEMINI_API_KEY found)");
        return "gemini".to_string();
    }

    if std::env::var("OPENAI_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: OpenAI (OPENAI_API_KEY found)");
        return "openai".to_string();
    }

    log::warn!("No AI credentials detected. Set GEMINI_API_KEY or OPENAI_API_KEY.");
    "gemini".to_string()
}
