use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("query does not match the expected format")]
    InvalidQuery,

    #[error("image is too small to read ({width}x{height})")]
    ImageNotClear { width: u32, height: u32 },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("the upstream provider is rate limiting requests")]
    RateLimited,

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("no valid digest after {attempts} attempts")]
    DigestUnavailable { attempts: u32 },

    #[error("no articles found")]
    NoArticlesFound,

    #[error("live news source is not configured")]
    NewsSourceUnavailable,

    #[error("internal server error")]
    InternalServerError,
}
