use crate::{
    domain::{
        common::{LLMConfig, LLMProvider, entities::app_errors::CoreError},
        llm::ports::LLMClient,
    },
    infrastructure::llm::{GeminiLLMClient, OpenAILLMClient},
};

/// The model client selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredLLMClient {
    OpenAI(OpenAILLMClient),
    Gemini(GeminiLLMClient),
}

impl ConfiguredLLMClient {
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        match config.provider {
            LLMProvider::OpenAI => OpenAILLMClient::new(config).map(Self::OpenAI),
            LLMProvider::Gemini => GeminiLLMClient::new(config).map(Self::Gemini),
        }
    }
}

impl LLMClient for ConfiguredLLMClient {
    async fn generate_with_image(
        &self,
        system_prompt: String,
        image_data: Vec<u8>,
    ) -> Result<String, CoreError> {
        match self {
            Self::OpenAI(client) => client.generate_with_image(system_prompt, image_data).await,
            Self::Gemini(client) => client.generate_with_image(system_prompt, image_data).await,
        }
    }

    async fn generate_with_text(
        &self,
        system_prompt: String,
        user_prompt: String,
        max_tokens: u32,
    ) -> Result<String, CoreError> {
        match self {
            Self::OpenAI(client) => {
                client
                    .generate_with_text(system_prompt, user_prompt, max_tokens)
                    .await
            }
            Self::Gemini(client) => {
                client
                    .generate_with_text(system_prompt, user_prompt, max_tokens)
                    .await
            }
        }
    }
}
