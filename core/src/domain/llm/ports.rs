use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Hosted chat model. Implementations return the trimmed text of the first
/// completion and map HTTP 429 to [`CoreError::RateLimited`].
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends a system instruction together with a JPEG image.
    fn generate_with_image(
        &self,
        system_prompt: String,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// `max_tokens` caps the completion length for this call only.
    fn generate_with_text(
        &self,
        system_prompt: String,
        user_prompt: String,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
