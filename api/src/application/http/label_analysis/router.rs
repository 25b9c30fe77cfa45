use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_label::{__path_analyze_label, analyze_label},
    get_age_groups::{__path_get_age_groups, get_age_groups},
    get_example_report::{__path_get_example_report, get_example_report},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_label, get_example_report, get_age_groups))]
pub struct LabelAnalysisApiDoc;

pub fn label_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/label-analysis", state.args.server.root_path),
            post(analyze_label),
        )
        .route(
            &format!("{}/label-analysis/example", state.args.server.root_path),
            get(get_example_report),
        )
        .route(
            &format!("{}/label-analysis/age-groups", state.args.server.root_path),
            get(get_age_groups),
        )
}
