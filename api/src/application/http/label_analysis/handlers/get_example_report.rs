use nutrinews_core::domain::label_analysis::{entities::AgeGroup, example::EXAMPLE_REPORT};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExampleReport {
    pub age_group: AgeGroup,
    /// Markdown report.
    pub report: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GetExampleReportResponse {
    pub data: ExampleReport,
}

#[utoipa::path(
    get,
    path = "/example",
    tag = "label-analysis",
    summary = "Example report",
    description = "A canned report showing what an analysis looks like, without calling the model.",
    responses(
        (status = 200, body = GetExampleReportResponse)
    ),
)]
pub async fn get_example_report() -> Response<GetExampleReportResponse> {
    Response::OK(GetExampleReportResponse {
        data: ExampleReport {
            age_group: AgeGroup::default(),
            report: EXAMPLE_REPORT.to_string(),
        },
    })
}
