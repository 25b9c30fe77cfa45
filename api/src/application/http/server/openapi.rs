use utoipa::OpenApi;

use crate::application::http::{
    health::HealthApiDoc, label_analysis::router::LabelAnalysisApiDoc,
    news_digest::router::NewsDigestApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutrinews API"
    ),
    nest(
        (path = "/label-analysis", api = LabelAnalysisApiDoc),
        (path = "/news-digest", api = NewsDigestApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
