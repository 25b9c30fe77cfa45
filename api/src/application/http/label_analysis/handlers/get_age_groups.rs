use nutrinews_core::domain::label_analysis::entities::AgeGroup;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    label_analysis::validators::AgeGroupOption, server::api_entities::response::Response,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GetAgeGroupsResponse {
    pub data: Vec<AgeGroupOption>,
}

#[utoipa::path(
    get,
    path = "/age-groups",
    tag = "label-analysis",
    summary = "List age groups",
    description = "Age groups a parent can pick for a label analysis. The default one is flagged.",
    responses(
        (status = 200, body = GetAgeGroupsResponse)
    ),
)]
pub async fn get_age_groups() -> Response<GetAgeGroupsResponse> {
    Response::OK(GetAgeGroupsResponse {
        data: AgeGroup::ALL.into_iter().map(AgeGroupOption::from).collect(),
    })
}
