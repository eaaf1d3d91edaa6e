// src/services/gemini_client.rs
// DOCUMENTATION: Gemini text generation client
// PURPOSE: Personalize capability backed by the Gemini generateContent API,
// plus the provider selection made at startup

use crate::config::Config;
use crate::errors::LunchError;
use crate::services::providers::TextGenerator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini REST client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// generateContent response (only the fields we read)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentPart {
    pub text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Single generateContent call; no retries
    pub async fn generate_text(&self, prompt: &str) -> Result<String, LunchError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 1024
            }
        });

        log::debug!("Gemini request: model={}, prompt {} chars", self.model, prompt.len());

        // the key goes in a header so it never shows up in a logged URL
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                log::error!("Gemini request failed: {}", e);
                LunchError::unreachable("gemini", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("Gemini error {}: {}", status, text);
            return Err(LunchError::Upstream {
                service: "gemini".to_string(),
                status: Some(status.as_u16()),
                details: serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LunchError::Parse(format!("gemini: {}", e.without_url())))?;

        parsed
            .text()
            .ok_or_else(|| LunchError::Parse("gemini returned no text".to_string()))
    }
}

/// Personalize backend selected from configuration
#[derive(Clone)]
pub enum TextProvider {
    Gemini(GeminiClient),
    /// Template-only mode; every generation fails and callers use templates
    Disabled,
}

impl TextProvider {
    pub fn from_config(config: &Config) -> Self {
        match config.ai_provider.to_ascii_lowercase().as_str() {
            "gemini" if !config.gemini_api_key.is_empty() => {
                log::info!("Personalization provider: gemini ({})", config.gemini_model);
                TextProvider::Gemini(GeminiClient::new(
                    &config.gemini_api_key,
                    &config.gemini_model,
                    &config.gemini_base_url,
                ))
            }
            "gemini" => {
                log::warn!("AI_PROVIDER=gemini but no API key is set, using templates");
                TextProvider::Disabled
            }
            other => {
                if other != "template" {
                    log::warn!("Unknown AI_PROVIDER '{}', using templates", other);
                }
                log::info!("Personalization provider: templates");
                TextProvider::Disabled
            }
        }
    }
}

impl TextGenerator for TextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LunchError> {
        match self {
            TextProvider::Gemini(client) => client.generate_text(prompt).await,
            TextProvider::Disabled => Err(LunchError::NotConfigured("generative AI".to_string())),
        }
    }
}
