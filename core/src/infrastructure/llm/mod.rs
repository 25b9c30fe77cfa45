pub mod gemini_client;
pub mod openai_client;
pub mod provider;

pub use gemini_client::GeminiLLMClient;
pub use openai_client::OpenAILLMClient;
pub use provider::ConfiguredLLMClient;
