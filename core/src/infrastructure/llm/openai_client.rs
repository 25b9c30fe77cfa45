use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    llm::ports::LLMClient,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAILLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn jpeg_data_uri(image_data: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(image_data)
    )
}

fn first_choice_text(response: ChatCompletionResponse) -> Result<String, CoreError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
}

impl OpenAILLMClient {
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
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn request(
        &self,
        system_prompt: String,
        user: MessageContent,
        max_tokens: u32,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
        }
    }

    async fn call_chat_api(&self, request: ChatCompletionRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("OpenAI API is rate limiting requests");
            return Err(CoreError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);
            tracing::error!("OpenAI API error: {} - {}", status, message);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, message
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        first_choice_text(completion)
    }
}

impl LLMClient for OpenAILLMClient {
    async fn generate_with_image(
        &self,
        system_prompt: String,
        image_data: Vec<u8>,
    ) -> Result<String, CoreError> {
        let request = self.request(
            system_prompt,
            MessageContent::Parts(vec![ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: jpeg_data_uri(&image_data),
                },
            }]),
            self.max_tokens,
        );

        self.call_chat_api(request).await
    }

    async fn generate_with_text(
        &self,
        system_prompt: String,
        user_prompt: String,
        max_tokens: u32,
    ) -> Result<String, CoreError> {
        let request = self.request(system_prompt, MessageContent::Text(user_prompt), max_tokens);

        self.call_chat_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::domain::common::LLMProvider;

    fn client() -> OpenAILLMClient {
        OpenAILLMClient::new(&LLMConfig {
            provider: LLMProvider::OpenAI,
            api_key: "sk-test".to_string(),
            model: "gpt-4o".to_string(),
            base_url: Some("http://localhost:9999/v1/".to_string()),
            max_tokens: 1000,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_is_normalised() {
        assert_eq!(client().base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_image_request_shape() {
        let client = client();
        let request = client.request(
            "system".to_string(),
            MessageContent::Parts(vec![ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: jpeg_data_uri(&[0xff, 0xd8]),
                },
            }]),
            client.max_tokens,
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "max_tokens": 1000,
                "messages": [
                    { "role": "system", "content": "system" },
                    {
                        "role": "user",
                        "content": [
                            {
                                "type": "image_url",
                                "image_url": { "url": "data:image/jpeg;base64,/9g=" }
                            }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_text_request_uses_per_call_token_cap() {
        let request = client().request(
            "system".to_string(),
            MessageContent::Text("Top 10 Sports News Today".to_string()),
            2000,
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"][1]["content"], "Top 10 Sports News Today");
    }

    #[test]
    fn test_first_choice_is_trimmed() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  report \n" } }]
        }))
        .unwrap();

        assert_eq!(first_choice_text(response).unwrap(), "report");
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();

        assert!(matches!(
            first_choice_text(response),
            Err(CoreError::ExternalServiceError(_))
        ));
    }
}
