use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::{
    common::{NewsConfig, entities::app_errors::CoreError},
    news_digest::{entities::NewsArticle, ports::NewsFetcher},
};

pub const NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

const NEWS_API_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the NewsAPI `everything` and `top-headlines` endpoints.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    api_key: String,
    base_url: String,
    language: String,
    country: Option<String>,
    page_size: u32,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiError {
    message: String,
}

impl From<NewsApiArticle> for NewsArticle {
    fn from(article: NewsApiArticle) -> Self {
        NewsArticle {
            title: article.title.unwrap_or_default().trim().to_string(),
            description: article.description.filter(|d| !d.trim().is_empty()),
            source: article.source.and_then(|s| s.name),
            url: article.url.unwrap_or_default().trim().to_string(),
        }
    }
}

fn usable_articles(response: NewsApiResponse) -> Vec<NewsArticle> {
    response
        .articles
        .into_iter()
        .map(NewsArticle::from)
        .filter(NewsArticle::is_usable)
        .collect()
}

impl NewsApiClient {
    pub fn new(api_key: String, config: &NewsConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(NEWS_API_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            country: config.country.clone(),
            page_size: config.page_size,
            client,
        })
    }

    /// Endpoint and query parameters for a topic search.
    fn search(&self, topic: &str) -> (String, Vec<(&'static str, String)>) {
        let page_size = self.page_size.to_string();

        match &self.country {
            Some(country) => (
                format!("{}/top-headlines", self.base_url),
                vec![
                    ("q", topic.to_string()),
                    ("country", country.clone()),
                    ("pageSize", page_size),
                ],
            ),
            None => (
                format!("{}/everything", self.base_url),
                vec![
                    ("q", topic.to_string()),
                    ("language", self.language.clone()),
                    ("sortBy", "publishedAt".to_string()),
                    ("pageSize", page_size),
                ],
            ),
        }
    }
}

impl NewsFetcher for NewsApiClient {
    async fn fetch_articles(&self, topic: String) -> Result<Vec<NewsArticle>, CoreError> {
        let (url, params) = self.search(&topic);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("News API request failed: {}", e);
                CoreError::ExternalServiceError(format!("News API error: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("News API is rate limiting requests");
            return Err(CoreError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<NewsApiError>(&error_text)
                .map(|e| e.message)
                .unwrap_or(error_text);
            tracing::error!("News API error: {} - {}", status, message);
            return Err(CoreError::ExternalServiceError(format!(
                "News API returned error: {} - {}",
                status, message
            )));
        }

        let body: NewsApiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse News API response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse news response: {}", e))
        })?;

        let articles = usable_articles(body);
        tracing::debug!(topic = %topic, count = articles.len(), "Fetched articles");

        Ok(articles)
    }
}

/// The news fetcher selected by configuration. Without an API key the live
/// variant is unavailable.
#[derive(Debug, Clone)]
pub enum ConfiguredNewsFetcher {
    NewsApi(NewsApiClient),
    Disabled,
}

impl ConfiguredNewsFetcher {
    pub fn from_config(config: &NewsConfig) -> Result<Self, CoreError> {
        match &config.api_key {
            Some(key) if !key.trim().is_empty() => {
                NewsApiClient::new(key.clone(), config).map(Self::NewsApi)
            }
            _ => Ok(Self::Disabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::NewsApi(_))
    }
}

impl NewsFetcher for ConfiguredNewsFetcher {
    async fn fetch_articles(&self, topic: String) -> Result<Vec<NewsArticle>, CoreError> {
        match self {
            Self::NewsApi(client) => client.fetch_articles(topic).await,
            Self::Disabled => Err(CoreError::NewsSourceUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(country: Option<&str>) -> NewsConfig {
        NewsConfig {
            api_key: Some("news-key".to_string()),
            base_url: "https://newsapi.example/v2/".to_string(),
            language: "en".to_string(),
            country: country.map(str::to_string),
            page_size: 10,
        }
    }

    #[test]
    fn test_everything_search_by_default() {
        let client = NewsApiClient::new("k".to_string(), &config(None)).unwrap();
        let (url, params) = client.search("Mumbai Business");

        assert_eq!(url, "https://newsapi.example/v2/everything");
        assert!(params.contains(&("q", "Mumbai Business".to_string())));
        assert!(params.contains(&("language", "en".to_string())));
        assert!(params.contains(&("pageSize", "10".to_string())));
    }

    #[test]
    fn test_country_switches_to_top_headlines() {
        let client = NewsApiClient::new("k".to_string(), &config(Some("in"))).unwrap();
        let (url, params) = client.search("Sports");

        assert_eq!(url, "https://newsapi.example/v2/top-headlines");
        assert!(params.contains(&("country", "in".to_string())));
    }

    #[test]
    fn test_articles_without_title_or_url_are_dropped() {
        let body: NewsApiResponse = serde_json::from_value(json!({
            "status": "ok",
            "totalResults": 3,
            "articles": [
                {
                    "source": { "id": null, "name": "Mint" },
                    "title": "Sensex closes higher",
                    "description": "Banks led the rally.",
                    "url": "https://news.example/sensex"
                },
                { "source": { "name": "Blank" }, "title": "", "url": "https://news.example/blank" },
                { "source": null, "title": "No link", "description": null, "url": null }
            ]
        }))
        .unwrap();

        let articles = usable_articles(body);

        assert_eq!(
            articles,
            vec![NewsArticle {
                title: "Sensex closes higher".to_string(),
                description: Some("Banks led the rally.".to_string()),
                source: Some("Mint".to_string()),
                url: "https://news.example/sensex".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_disabled_fetcher_reports_unavailable() {
        let mut news = config(None);
        news.api_key = None;
        let fetcher = ConfiguredNewsFetcher::from_config(&news).unwrap();

        assert!(!fetcher.is_enabled());
        assert_eq!(
            fetcher.fetch_articles("Sports".to_string()).await,
            Err(CoreError::NewsSourceUnavailable)
        );
    }
}
