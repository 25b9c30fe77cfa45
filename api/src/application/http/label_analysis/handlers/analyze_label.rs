use axum::extract::{Multipart, State};
use nutrinews_core::domain::label_analysis::{
    entities::{AgeGroup, LabelAnalysis},
    policies::ensure_upload_size,
    ports::LabelAnalysisService,
    value_objects::AnalyzeLabelInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    label_analysis::validators::AnalyzeLabelForm,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeLabelResponse {
    pub data: LabelAnalysis,
}

#[utoipa::path(
    post,
    path = "",
    tag = "label-analysis",
    summary = "Analyze a nutrition label",
    description = "Reads a photo of a packaged food label and returns a markdown report for the selected age group.",
    request_body(content = AnalyzeLabelForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeLabelResponse),
        (status = 400, description = "Missing, unreadable or unclear image"),
        (status = 429, description = "Model provider rate limit"),
        (status = 502, description = "Model provider failure"),
    ),
)]
pub async fn analyze_label(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let mut age_group = AgeGroup::default();
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "age_group" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read age_group: {}", e))
                })?;
                if !value.trim().is_empty() {
                    age_group = value.parse().map_err(ApiError::from)?;
                }
            }
            "image" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                ensure_upload_size(data.len()).map_err(ApiError::from)?;
                image_data = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let image_data = image_data
        .filter(|data| !data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let analysis = state
        .service
        .analyze_label(AnalyzeLabelInput {
            image_data,
            age_group,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeLabelResponse { data: analysis }))
}
