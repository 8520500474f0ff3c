//! `OpenAI`-compatible provider implementation.
//!
//! Works against api.openai.com and any compatible local or self-hosted
//! server (Ollama, vLLM, llama.cpp, LM Studio) by pointing `AI_BASE_URL`
//! at it. Uses chat-completions JSON mode; the response schema is not
//! enforced server-side, so callers rely on their own validation.

use serde::{Deserialize, Serialize};

use super::GenerativeProvider;
use crate::AiError;

/// `OpenAI` chat-completions provider.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new `OpenAI`-compatible provider.
    ///
    /// `base_url` is the API root without a trailing slash, e.g.
    /// `https://api.openai.com/v1` or `http://localhost:11434/v1`.
    #[must_use]
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    response_format: ResponseFormat<'a>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[async_trait::async_trait]
impl GenerativeProvider for OpenAiProvider {
    async fn generate_json(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, AiError> {
        let request = OpenAiRequest {
            model: &self.model,
            messages: vec![OpenAiMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            max_tokens: 4096,
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let err: OpenAiError = serde_json::from_str(&body).unwrap_or_else(|_| OpenAiError {
                error: OpenAiErrorDetail {
                    message: format!("HTTP {status}: {body}"),
                },
            });
            return Err(AiError::Provider {
                message: err.error.message,
            });
        }

        let response: OpenAiResponse = serde_json::from_str(&body)?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        match text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(AiError::Provider {
                message: "OpenAI returned no message content".to_string(),
            }),
        }
    }
}
