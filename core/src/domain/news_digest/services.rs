use chrono::Utc;
use tracing::{instrument, warn};

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        retry::{RetryError, retry_until_valid},
        services::Service,
    },
    llm::ports::LLMClient,
    news_digest::{
        DIGEST_ITEM_COUNT,
        entities::{DigestSource, NewsDigest, Query},
        ports::{NewsDigestService, NewsFetcher},
        prompts::build_digest_prompt,
        sponsors::sample_sponsors,
        validation::ResponseValidator,
        value_objects::GenerateDigestInput,
    },
};

impl<LLM, NF, RV> NewsDigestService for Service<LLM, NF, RV>
where
    LLM: LLMClient,
    NF: NewsFetcher,
    RV: ResponseValidator,
{
    #[instrument(skip(self), fields(query = %input.query, live = input.live))]
    async fn generate_digest(&self, input: GenerateDigestInput) -> Result<NewsDigest, CoreError> {
        // 1. Validate query
        let query = Query::parse(&input.query).inspect_err(|_| {
            warn!("Rejected malformed digest query");
        })?;

        // 2. Fetch live articles when requested
        let (source, articles) = if input.live {
            let articles: Vec<_> = self
                .news_fetcher
                .fetch_articles(query.topic().to_string())
                .await?
                .into_iter()
                .filter(|article| article.is_usable())
                .collect();

            if articles.is_empty() {
                warn!(topic = query.topic(), "News source returned no usable articles");
                return Err(CoreError::NoArticlesFound);
            }

            tracing::debug!(count = articles.len(), "Fetched live articles");
            (DigestSource::Live, Some(articles))
        } else {
            (DigestSource::Model, None)
        };

        // 3. Build the prompt once; every attempt resends it unchanged
        let sponsors = {
            let mut rng = rand::thread_rng();
            sample_sponsors(&mut rng, DIGEST_ITEM_COUNT)
        };
        let prompt = build_digest_prompt(
            &query,
            Utc::now().date_naive(),
            &sponsors,
            articles.as_deref(),
        );

        // 4. Generate until the response validates or the budget runs out
        let validator = self.response_validator.as_ref();
        let max_tokens = self.digest_config.max_tokens;
        let outcome = retry_until_valid(
            &self.digest_config.retry,
            |attempt| {
                let prompt = prompt.clone();
                async move {
                    tracing::debug!(attempt, "Requesting digest from model");
                    self.llm_client
                        .generate_with_text(prompt.system, prompt.user, max_tokens)
                        .await
                }
            },
            |candidate: &String| validator.validate(candidate),
        )
        .await;

        match outcome {
            Ok(validated) => {
                let markers = validator.markers(&validated.value);
                tracing::info!(attempts = validated.attempts, %markers, "Digest accepted");

                Ok(NewsDigest::new(
                    &query,
                    source,
                    &validated.value,
                    validated.verdict,
                    validated.attempts,
                    markers,
                ))
            }
            Err(RetryError::Aborted { error, attempts }) => {
                tracing::error!(attempts, error = %error, "Model call failed, giving up");
                Err(error)
            }
            Err(RetryError::Exhausted {
                attempts,
                last_reason,
            }) => {
                tracing::error!(attempts, %last_reason, "No valid digest within retry budget");
                Err(CoreError::DigestUnavailable { attempts })
            }
        }
    }
}
