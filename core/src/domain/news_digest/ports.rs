use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    news_digest::{
        entities::{NewsArticle, NewsDigest},
        value_objects::GenerateDigestInput,
    },
};

/// Source of live articles for a topic. Implementations drop articles without
/// a title or url.
#[cfg_attr(test, mockall::automock)]
pub trait NewsFetcher: Send + Sync {
    fn fetch_articles(
        &self,
        topic: String,
    ) -> impl Future<Output = Result<Vec<NewsArticle>, CoreError>> + Send;
}

/// Service trait for the news digest pipeline
#[cfg_attr(test, mockall::automock)]
pub trait NewsDigestService: Send + Sync {
    fn generate_digest(
        &self,
        input: GenerateDigestInput,
    ) -> impl Future<Output = Result<NewsDigest, CoreError>> + Send;
}
