use std::sync::Arc;

use nutrinews_core::application::NutrinewsService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutrinewsService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutrinewsService) -> Self {
        Self { args, service }
    }
}
