use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    llm::ports::LLMClient,
};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model_name: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn request(&self, system_prompt: String, parts: Vec<Part>, max_tokens: u32) -> GeminiRequest {
        GeminiRequest {
            system_instruction: Content {
                parts: vec![Part::Text {
                    text: system_prompt,
                }],
            },
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
            },
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Gemini API is rate limiting requests");
            return Err(CoreError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        candidate_text(gemini_response)
    }
}

/// Joins the text parts of the first candidate.
fn candidate_text(response: GeminiResponse) -> Result<String, CoreError> {
    response
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<String>()
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        system_prompt: String,
        image_data: Vec<u8>,
    ) -> Result<String, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        let request = self.request(
            system_prompt,
            vec![Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/jpeg".to_string(),
                    data: base64_image,
                },
            }],
            self.max_tokens,
        );

        self.call_gemini_api(request).await
    }

    async fn generate_with_text(
        &self,
        system_prompt: String,
        user_prompt: String,
        max_tokens: u32,
    ) -> Result<String, CoreError> {
        let request = self.request(
            system_prompt,
            vec![Part::Text { text: user_prompt }],
            max_tokens,
        );

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::common::LLMProvider;

    #[test]
    fn test_text_request_uses_per_call_token_cap() {
        let client = GeminiLLMClient::new(&LLMConfig {
            provider: LLMProvider::Gemini,
            api_key: "g-test".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: None,
            max_tokens: 1000,
            timeout: std::time::Duration::from_secs(5),
        })
        .unwrap();

        let request = client.request(
            "system".to_string(),
            vec![Part::Text {
                text: "Top 10 Sports News Today".to_string(),
            }],
            2000,
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "system_instruction": { "parts": [{ "text": "system" }] },
                "contents": [{ "parts": [{ "text": "Top 10 Sports News Today" }] }],
                "generation_config": { "max_output_tokens": 2000 }
            })
        );
    }

    #[test]
    fn test_candidate_parts_are_joined() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "1. **One**\n" }, { "text": "---\n" }] }
            }]
        }))
        .unwrap();

        assert_eq!(candidate_text(response).unwrap(), "1. **One**\n---");
    }

    #[test]
    fn test_blocked_prompt_has_no_candidates() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();

        assert!(matches!(
            candidate_text(response),
            Err(CoreError::ExternalServiceError(_))
        ));
    }
}
