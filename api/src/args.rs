use std::ffi::OsString;
use std::time::Duration;

use clap::{Args as ClapArgs, CommandFactory, FromArgMatches, Parser, ValueEnum};
use nutrinews_core::domain::{
    common::{DigestConfig, LLMConfig, LLMProvider, NewsConfig, NutrinewsConfig},
    common::retry::{DelayStrategy, RetryPolicy},
    news_digest::validation::AcceptancePolicy,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrinews", version, about = "Food label analysis and news digest API")]
pub struct Args {
    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub news: NewsArgs,

    #[command(flatten)]
    pub digest: DigestArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Gemini,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "llm-provider", env = "LLM_PROVIDER", value_enum, default_value_t = ProviderArg::Openai)]
    pub provider: ProviderArg,

    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Defaults to the provider's vision model.
    #[arg(long = "llm-model", env = "LLM_MODEL")]
    pub model: Option<String>,

    /// Overrides the provider's default endpoint.
    #[arg(id = "llm_base_url", long = "llm-base-url", env = "LLM_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(id = "llm_max_tokens", long = "llm-max-tokens", env = "LLM_MAX_TOKENS", default_value_t = 1000)]
    pub max_tokens: u32,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct NewsArgs {
    /// Enables live digests when set.
    #[arg(long = "news-api-key", env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(id = "news_base_url", long = "news-base-url", env = "NEWS_BASE_URL", default_value = "https://newsapi.org/v2")]
    pub base_url: String,

    #[arg(long = "news-language", env = "NEWS_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Restricts live digests to one country's top headlines.
    #[arg(long = "news-country", env = "NEWS_COUNTRY")]
    pub country: Option<String>,

    #[arg(long = "news-page-size", env = "NEWS_PAGE_SIZE", default_value_t = 20)]
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AcceptanceArg {
    Strict,
    Tolerant,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DigestArgs {
    #[arg(long = "digest-max-attempts", env = "DIGEST_MAX_ATTEMPTS", default_value_t = RetryPolicy::DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    #[arg(long = "digest-acceptance", env = "DIGEST_ACCEPTANCE", value_enum, default_value_t = AcceptanceArg::Strict)]
    pub acceptance: AcceptanceArg,

    /// Smallest marker count the tolerant policy still accepts, from 1 to 10.
    #[arg(long = "digest-min-items", env = "DIGEST_MIN_ITEMS", default_value_t = AcceptancePolicy::DEFAULT_TOLERANT_MIN_ITEMS as u64, value_parser = clap::value_parser!(u64).range(1..=10))]
    pub min_items: u64,

    /// Completion cap for digest calls.
    #[arg(id = "digest_max_tokens", long = "digest-max-tokens", env = "DIGEST_MAX_TOKENS", default_value_t = DigestConfig::DEFAULT_MAX_TOKENS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tokens: u32,

    /// Base delay between attempts in milliseconds. 0 retries immediately.
    #[arg(long = "digest-retry-delay-ms", env = "DIGEST_RETRY_DELAY_MS", default_value_t = 0)]
    pub retry_delay_ms: u64,

    /// Doubles the delay after every attempt, capped at this many milliseconds.
    #[arg(long = "digest-retry-max-delay-ms", env = "DIGEST_RETRY_MAX_DELAY_MS")]
    pub retry_max_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl Args {
    /// Parses `argv` alone, without the environment fallbacks.
    pub fn try_parse_args_only<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut matches = Self::command()
            .mut_args(|arg| arg.env(None))
            .try_get_matches_from(argv)?;
        Self::from_arg_matches_mut(&mut matches)
    }
}

impl DigestArgs {
    fn delay_strategy(&self) -> DelayStrategy {
        let base = Duration::from_millis(self.retry_delay_ms);
        match (self.retry_delay_ms, self.retry_max_delay_ms) {
            (0, _) => DelayStrategy::None,
            (_, Some(max)) => DelayStrategy::Exponential {
                base,
                max: Duration::from_millis(max),
            },
            (_, None) => DelayStrategy::Fixed(base),
        }
    }

    fn acceptance_policy(&self) -> AcceptancePolicy {
        match self.acceptance {
            AcceptanceArg::Strict => AcceptancePolicy::Strict,
            AcceptanceArg::Tolerant => AcceptancePolicy::tolerant_with(self.min_items as usize),
        }
    }
}

impl LlmArgs {
    fn provider(&self) -> LLMProvider {
        match self.provider {
            ProviderArg::Openai => LLMProvider::OpenAI,
            ProviderArg::Gemini => LLMProvider::Gemini,
        }
    }

    /// Key of the selected provider. A missing key is a startup error.
    fn api_key(&self) -> Result<String, anyhow::Error> {
        let (key, var) = match self.provider {
            ProviderArg::Openai => (&self.openai_api_key, "OPENAI_API_KEY"),
            ProviderArg::Gemini => (&self.gemini_api_key, "GEMINI_API_KEY"),
        };

        key.as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("{var} must be set"))
    }

    fn model(&self) -> String {
        let default = match self.provider {
            ProviderArg::Openai => "gpt-4o",
            ProviderArg::Gemini => "gemini-2.0-flash",
        };
        self.model.clone().unwrap_or_else(|| default.to_string())
    }
}

impl TryFrom<Args> for NutrinewsConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let digest = DigestConfig {
            retry: RetryPolicy::new(args.digest.max_attempts, args.digest.delay_strategy()),
            acceptance: args.digest.acceptance_policy(),
            max_tokens: args.digest.max_tokens,
        };

        Ok(NutrinewsConfig {
            llm: LLMConfig {
                provider: args.llm.provider(),
                api_key: args.llm.api_key()?,
                model: args.llm.model(),
                base_url: args.llm.base_url,
                max_tokens: args.llm.max_tokens,
                timeout: Duration::from_secs(args.llm.timeout_secs),
            },
            news: NewsConfig {
                api_key: args.news.api_key,
                base_url: args.news.base_url,
                language: args.news.language,
                country: args.news.country,
                page_size: args.news.page_size,
            },
            digest,
        })
    }
}
