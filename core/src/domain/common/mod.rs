use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

use crate::domain::{common::retry::RetryPolicy, news_digest::validation::AcceptancePolicy};

pub mod entities;
pub mod retry;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutrinewsConfig {
    pub llm: LLMConfig,
    pub news: NewsConfig,
    pub digest: DigestConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMProvider {
    OpenAI,
    Gemini,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Live news settings. `api_key` is `None` when the live variant is disabled.
#[derive(Clone, Debug)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub country: Option<String>,
    pub page_size: u32,
}

#[derive(Clone, Debug)]
pub struct DigestConfig {
    pub retry: RetryPolicy,
    pub acceptance: AcceptancePolicy,
    /// Completion cap for digest calls. `LLMConfig::max_tokens` only applies
    /// to label reports.
    pub max_tokens: u32,
}

impl DigestConfig {
    pub const DEFAULT_MAX_TOKENS: u32 = 2000;
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            acceptance: AcceptancePolicy::Strict,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Creation time of an entity together with the matching uuid v7 timestamp,
/// so `id` and `created_at` agree to the nanosecond.
pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}
