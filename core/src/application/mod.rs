use crate::{
    domain::{
        common::{NutrinewsConfig, services::Service},
        news_digest::validation::MarkerCountValidator,
    },
    infrastructure::{llm::ConfiguredLLMClient, news::ConfiguredNewsFetcher},
};

pub type NutrinewsService =
    Service<ConfiguredLLMClient, ConfiguredNewsFetcher, MarkerCountValidator>;

/// Builds the service once at startup from the loaded configuration.
pub fn create_service(config: NutrinewsConfig) -> Result<NutrinewsService, anyhow::Error> {
    let llm_client = ConfiguredLLMClient::from_config(&config.llm)?;
    let news_fetcher = ConfiguredNewsFetcher::from_config(&config.news)?;

    if news_fetcher.is_enabled() {
        tracing::info!("Live news digests enabled");
    } else {
        tracing::info!("No news API key configured, live news digests disabled");
    }

    let response_validator = MarkerCountValidator::new(config.digest.acceptance);

    Ok(Service::new(
        llm_client,
        news_fetcher,
        response_validator,
        config.digest,
    ))
}
