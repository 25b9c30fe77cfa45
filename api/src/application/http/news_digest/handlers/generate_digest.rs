use axum::extract::State;
use nutrinews_core::domain::news_digest::{
    entities::NewsDigest, ports::NewsDigestService, value_objects::GenerateDigestInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    news_digest::validators::GenerateDigestRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateDigestResponse {
    pub data: NewsDigest,
}

#[utoipa::path(
    post,
    path = "",
    tag = "news-digest",
    summary = "Generate a top 10 news digest",
    description = "Generates ten sponsored news items for a query of the form \"Top 10 <Topic> News Today\". Responses that do not have exactly ten items are regenerated within the retry budget.",
    request_body = GenerateDigestRequest,
    responses(
        (status = 200, body = GenerateDigestResponse),
        (status = 400, description = "Query does not match the expected format"),
        (status = 404, description = "Live news returned no articles"),
        (status = 429, description = "Upstream rate limit"),
        (status = 503, description = "No well formed digest within the retry budget, or live news disabled"),
    ),
)]
pub async fn generate_digest(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateDigestRequest>,
) -> Result<Response<GenerateDigestResponse>, ApiError> {
    let digest = state
        .service
        .generate_digest(GenerateDigestInput {
            query: payload.query,
            live: payload.live,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateDigestResponse { data: digest }))
}
