use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::generate_digest::{__path_generate_digest, generate_digest};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate_digest))]
pub struct NewsDigestApiDoc;

pub fn news_digest_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/news-digest", state.args.server.root_path),
        post(generate_digest),
    )
}
