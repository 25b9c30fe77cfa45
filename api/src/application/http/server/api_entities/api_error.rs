use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutrinews_core::domain::{
    common::entities::app_errors::CoreError, label_analysis::policies::UNCLEAR_IMAGE_WARNING,
    news_digest::policies::QUERY_HELP,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

pub const RATE_LIMIT_MESSAGE: &str =
    "The model provider is rate limiting requests. Please wait a minute and try again.";
pub const DIGEST_UNAVAILABLE_MESSAGE: &str =
    "Could not produce a well formed digest right now. Please try again later.";

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub status: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TooManyRequests(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::NotFound(_) => "E_NOT_FOUND",
            ApiError::TooManyRequests(_) => "E_RATE_LIMITED",
            ApiError::BadGateway(_) => "E_BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "E_SERVICE_UNAVAILABLE",
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidQuery => ApiError::BadRequest(QUERY_HELP.to_string()),
            CoreError::ImageNotClear { .. } => {
                ApiError::BadRequest(UNCLEAR_IMAGE_WARNING.to_string())
            }
            CoreError::InvalidImage(_) | CoreError::InvalidInput(_) => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::RateLimited => ApiError::TooManyRequests(RATE_LIMIT_MESSAGE.to_string()),
            CoreError::ExternalServiceError(_) => {
                ApiError::BadGateway("An upstream provider failed to respond".to_string())
            }
            CoreError::DigestUnavailable { .. } => {
                ApiError::ServiceUnavailable(DIGEST_UNAVAILABLE_MESSAGE.to_string())
            }
            CoreError::NoArticlesFound => {
                ApiError::NotFound("No articles found for this topic".to_string())
            }
            CoreError::NewsSourceUnavailable => ApiError::ServiceUnavailable(
                "Live news is not available on this server".to_string(),
            ),
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            status: status.as_u16() as i64,
        };

        (status, Json(body)).into_response()
    }
}

/// Error returned when a payload fails its `validator` rules.
pub trait ValidationRejection {
    fn rejection(errors: ValidationErrors) -> ApiError;
}

/// JSON extractor that also runs the payload's `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + ValidationRejection,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value.validate().map_err(T::rejection)?;

        Ok(ValidateJson(value))
    }
}
