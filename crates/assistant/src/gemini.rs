//! Client for the Google Generative Language API (`generateContent`).
//!
//! The model is asked to answer in JSON mode with the flow output schema,
//! so the text of the first candidate is itself the JSON payload.

use std::time::Duration;

use async_trait::async_trait;
use caloriewise_shared::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{GenerationRequest, GenerativeModel};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(60),
            temperature: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
    candidate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiError,
}

pub struct GeminiModel {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiModel {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| Error::Unknown(err.into()))?;

        Ok(Self { client, settings })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn extract_text(response: GeminiResponse) -> Result<String> {
        if let Some(error) = response.error {
            return Err(Error::generation(format!("model API error: {}", error.message)));
        }

        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::generation(format!("prompt blocked: {reason}")));
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(Error::generation("model returned no candidates"));
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::generation(format!(
                "model returned an empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    #[instrument(skip_all, fields(flow = request.flow, model = %self.settings.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<serde_json::Value> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: Some(request.prompt),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.output_schema,
                candidate_count: 1,
                temperature: self.settings.temperature,
            },
        };

        debug!("sending generateContent request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!(err = %err, "model request failed");
                Error::generation(format!("request failed: {err}"))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| Error::generation(format!("failed to read response: {err}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            error!(status = %status, message = %message, "model API returned an error");

            return Err(Error::generation(format!(
                "model API returned {status}: {message}"
            )));
        }

        let response: GeminiResponse = serde_json::from_str(&text)
            .map_err(|err| Error::generation(format!("unexpected response body: {err}")))?;

        let output = Self::extract_text(response)?;

        serde_json::from_str(&output).map_err(|err| {
            error!(err = %err, "model output is not valid JSON");
            Error::generation(format!("model output is not valid JSON: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extract_joins_text_parts() {
        let text = GeminiModel::extract_text(response(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                "finishReason": "STOP"
            }]
        })))
        .unwrap();

        assert_eq!(text, "{\"a\":1}");
    }

    #[test]
    fn extract_fails_without_candidates() {
        let err = GeminiModel::extract_text(response(json!({ "candidates": [] }))).unwrap_err();
        assert!(matches!(err, Error::Generation(ref msg) if msg.contains("no candidates")));
    }

    #[test]
    fn extract_reports_block_reason() {
        let err = GeminiModel::extract_text(response(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .unwrap_err();

        assert!(matches!(err, Error::Generation(ref msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn extract_reports_empty_candidate() {
        let err = GeminiModel::extract_text(response(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        })))
        .unwrap_err();

        assert!(matches!(err, Error::Generation(ref msg) if msg.contains("MAX_TOKENS")));
    }

    #[test]
    fn request_body_uses_json_mode() {
        let schema = json!({ "type": "OBJECT" });
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: Some("hi".to_owned()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
                candidate_count: 1,
                temperature: None,
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert!(value["generationConfig"].get("temperature").is_none());
    }
}
