//! Generation client abstraction and implementations.
//!
//! Defines the [`GenerationClient`] trait and concrete implementations:
//! - **[`DisabledClient`]** — returns errors; used when no provider is configured.
//! - **[`GeminiClient`]** — calls the Gemini `generateContent` API.
//!
//! # Provider Selection
//!
//! Use [`create_client`] to instantiate the appropriate client based on the
//! `[model]` configuration section.
//!
//! # Call Policy
//!
//! The request handler issues exactly one generation call per chat request.
//! There is no retry, no backoff, and no explicit timeout; a failure is
//! fatal for that request and surfaces as a server error.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::config::ModelConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Trait for text-generation backends.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Returns the model identifier (e.g. `"gemini-2.0-flash"`).
    fn model_name(&self) -> &str;

    /// Submit a composed prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ============ Disabled client ============

/// A no-op client that always returns errors.
///
/// Used when `model.provider = "disabled"`. The server still boots, but
/// every chat request fails at the generation stage.
pub struct DisabledClient;

#[async_trait]
impl GenerationClient for DisabledClient {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("Generation provider is disabled")
    }
}

// ============ Gemini client ============

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Generation client for the Gemini API.
///
/// Sends a single `POST` to `models/{model}:generateContent` per call.
/// Requires the `GEMINI_API_KEY` environment variable to be set.
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not in the environment.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => bail!("GEMINI_API_KEY environment variable not set"),
        };

        Ok(Self {
            http: reqwest::Client::new(),
            model: config.name.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Gemini API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json().await?;
        parse_generate_response(&json)
    }
}

/// Parse the `generateContent` response JSON.
///
/// Extracts the first candidate's text parts and concatenates them.
fn parse_generate_response(json: &serde_json::Value) -> Result<String> {
    let candidate = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| anyhow::anyhow!("Invalid Gemini response: no candidates"))?;

    let parts = candidate
        .pointer("/content/parts")
        .and_then(|p| p.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid Gemini response: missing content parts"))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        bail!("Invalid Gemini response: candidate contains no text");
    }

    Ok(text)
}

/// Create the appropriate [`GenerationClient`] based on configuration.
///
/// # Errors
///
/// Returns an error for unknown provider names or if the Gemini client
/// cannot be initialized (missing API key).
pub fn create_client(config: &ModelConfig) -> Result<Box<dyn GenerationClient>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledClient)),
        "gemini" => Ok(Box::new(GeminiClient::new(config)?)),
        other => bail!("Unknown model provider: {}", other),
    }
}
