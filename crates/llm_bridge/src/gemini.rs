//! Gemini 2.5 Flash integration for multimodal text generation
//!
//! Sends the instruction text and the screenshot as inline data in a
//! single `generateContent` request and hands back whatever text the
//! model produced.

use crate::config::{Credential, GeminiConfig};
use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Gemini API client for multimodal generation
pub struct GeminiClient {
    config: GeminiConfig,
    credential: Credential,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig, credential: Credential) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            credential,
            client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Generate text from an ordered list of parts in one user turn
    ///
    /// # Returns
    /// * The text parts of the first candidate, concatenated
    pub async fn generate_content(&self, parts: Vec<GeminiPart>) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.credential.expose())
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        gemini_response.into_text()
    }
}

/// A request part: plain text or base64 inline data
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        GeminiPart::Text { text: text.into() }
    }

    pub fn image(mime_type: &str, bytes: &[u8]) -> Self {
        GeminiPart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data: general_purpose::STANDARD.encode(bytes),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    mime_type: String,
    data: String,
}

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiResponse {
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            anyhow::bail!("Prompt blocked by Gemini: {}", reason);
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .context("No candidates in Gemini response")?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            anyhow::bail!(
                "No text in Gemini response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new(
            GeminiConfig::default(),
            Credential::new("test-key").unwrap(),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_part_serialization() {
        let parts = vec![GeminiPart::text("[锐评]"), GeminiPart::image("image/png", b"png")];
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(json[0], json!({ "text": "[锐评]" }));
        assert_eq!(
            json[1],
            json!({ "inline_data": { "mime_type": "image/png", "data": "cG5n" } })
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "planning...", "thought": true },
                    { "text": "## 🩺 账号成分诊断书" },
                    { "text": " | 锐评" }
                ]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(response.into_text().unwrap(), "## 🩺 账号成分诊断书 | 锐评");
    }

    #[test]
    fn test_response_without_candidates() {
        let err = parse(json!({})).into_text().unwrap_err();
        assert!(err.to_string().contains("No candidates"));
    }

    #[test]
    fn test_response_blocked() {
        let err = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
            .into_text()
            .unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_response_without_text() {
        let err = parse(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }))
        .into_text()
        .unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
