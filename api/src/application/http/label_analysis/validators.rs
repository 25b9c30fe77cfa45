use nutrinews_core::domain::label_analysis::entities::AgeGroup;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart body of a label analysis request. Only used for the OpenAPI
/// schema; the handler reads the fields itself.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeLabelForm {
    /// JPEG or PNG photo of the nutrition label.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub age_group: Option<AgeGroup>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AgeGroupOption {
    pub id: AgeGroup,
    pub label: String,
    pub default: bool,
}

impl From<AgeGroup> for AgeGroupOption {
    fn from(group: AgeGroup) -> Self {
        Self {
            id: group,
            label: group.label().to_string(),
            default: group == AgeGroup::default(),
        }
    }
}
