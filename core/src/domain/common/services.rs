use std::sync::Arc;

use crate::domain::{
    common::DigestConfig,
    llm::ports::LLMClient,
    news_digest::{ports::NewsFetcher, validation::ResponseValidator},
};

/// Holds the adapters shared by both pipelines. Cloning is cheap.
pub struct Service<LLM, NF, RV>
where
    LLM: LLMClient,
    NF: NewsFetcher,
    RV: ResponseValidator,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) news_fetcher: Arc<NF>,
    pub(crate) response_validator: Arc<RV>,
    pub(crate) digest_config: DigestConfig,
}

impl<LLM, NF, RV> Service<LLM, NF, RV>
where
    LLM: LLMClient,
    NF: NewsFetcher,
    RV: ResponseValidator,
{
    pub fn new(
        llm_client: LLM,
        news_fetcher: NF,
        response_validator: RV,
        digest_config: DigestConfig,
    ) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            news_fetcher: Arc::new(news_fetcher),
            response_validator: Arc::new(response_validator),
            digest_config,
        }
    }
}

impl<LLM, NF, RV> Clone for Service<LLM, NF, RV>
where
    LLM: LLMClient,
    NF: NewsFetcher,
    RV: ResponseValidator,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            news_fetcher: Arc::clone(&self.news_fetcher),
            response_validator: Arc::clone(&self.response_validator),
            digest_config: self.digest_config.clone(),
        }
    }
}
