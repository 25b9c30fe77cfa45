use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    label_analysis::{
        entities::{LabelAnalysis, LabelImage},
        policies::{ensure_image_clear, ensure_upload_size},
        ports::LabelAnalysisService,
        prompts::build_label_prompt,
        value_objects::AnalyzeLabelInput,
    },
    llm::ports::LLMClient,
    news_digest::{ports::NewsFetcher, validation::ResponseValidator},
};

impl<LLM, NF, RV> LabelAnalysisService for Service<LLM, NF, RV>
where
    LLM: LLMClient,
    NF: NewsFetcher,
    RV: ResponseValidator,
{
    #[instrument(skip(self, input), fields(age_group = input.age_group.as_str(), bytes = input.image_data.len()))]
    async fn analyze_label(&self, input: AnalyzeLabelInput) -> Result<LabelAnalysis, CoreError> {
        let AnalyzeLabelInput {
            image_data,
            age_group,
        } = input;

        // 1. Validate upload; decoding runs on the blocking pool
        ensure_upload_size(image_data.len())?;
        let image = tokio::task::spawn_blocking(move || LabelImage::decode(&image_data))
            .await
            .map_err(|e| {
                tracing::error!("Label decode task failed: {}", e);
                CoreError::InternalServerError
            })??;

        if let Err(e) = ensure_image_clear(&image) {
            tracing::warn!(
                width = image.width,
                height = image.height,
                "Rejected label image below minimum dimensions"
            );
            return Err(e);
        }

        // 2. Build prompt and call the model
        let prompt = build_label_prompt(age_group);
        let report = self
            .llm_client
            .generate_with_image(prompt, image.jpeg.clone())
            .await?;

        tracing::info!(report_len = report.len(), "Label analysis completed");

        Ok(LabelAnalysis::new(age_group, &image, report))
    }
}
