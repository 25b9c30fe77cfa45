use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    label_analysis::{entities::LabelAnalysis, value_objects::AnalyzeLabelInput},
};

/// Service trait for the label analysis pipeline
#[cfg_attr(test, mockall::automock)]
pub trait LabelAnalysisService: Send + Sync {
    fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;
}
