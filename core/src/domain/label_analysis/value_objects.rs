use crate::domain::label_analysis::entities::AgeGroup;

#[derive(Debug, Clone)]
pub struct AnalyzeLabelInput {
    pub image_data: Vec<u8>,
    pub age_group: AgeGroup,
}
