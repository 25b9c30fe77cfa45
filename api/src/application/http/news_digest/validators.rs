use nutrinews_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::application::http::server::api_entities::api_error::{ApiError, ValidationRejection};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct GenerateDigestRequest {
    #[schema(example = "Top 10 Mumbai Business News Today")]
    #[validate(length(
        min = 1,
        max = 200,
        message = "query must be between 1 and 200 characters"
    ))]
    pub query: String,
    /// Summarise real articles from the news API instead of the model's own knowledge.
    #[serde(default)]
    pub live: bool,
}

/// Out of range queries get the same help message as malformed ones.
impl ValidationRejection for GenerateDigestRequest {
    fn rejection(_: ValidationErrors) -> ApiError {
        ApiError::from(CoreError::InvalidQuery)
    }
}
