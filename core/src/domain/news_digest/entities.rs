use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp, retry::Verdict},
    news_digest::{policies::is_valid_query, prompts::COMPLETION_MARKER},
};

/// A validated digest query such as `Top 10 Mumbai Business News Today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    const PREFIX: &'static str = "Top 10 ";
    const SUFFIX: &'static str = " News Today";

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if is_valid_query(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::InvalidQuery)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The words between `Top 10 ` and ` News Today`.
    pub fn topic(&self) -> &str {
        self.0
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_suffix(Self::SUFFIX))
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub url: String,
}

impl NewsArticle {
    pub fn is_usable(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DigestSource {
    /// Written from the model's own knowledge.
    Model,
    /// Summarised from articles fetched from the news API.
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DigestStatus {
    Accepted,
    AcceptedWithWarning,
}

/// Occurrences of the structural markers in one model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct MarkerCounts {
    pub delimiters: usize,
    pub headlines: usize,
    pub sponsors: usize,
}

impl MarkerCounts {
    pub fn all_equal(&self, expected: usize) -> bool {
        self.delimiters == expected && self.headlines == expected && self.sponsors == expected
    }

    pub fn all_at_least(&self, minimum: usize) -> bool {
        self.delimiters >= minimum && self.headlines >= minimum && self.sponsors >= minimum
    }
}

impl fmt::Display for MarkerCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delimiters={} headlines={} sponsors={}",
            self.delimiters, self.headlines, self.sponsors
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewsDigest {
    pub id: Uuid,
    pub query: String,
    pub source: DigestSource,
    /// Markdown digest with the completion marker removed.
    pub content: String,
    pub status: DigestStatus,
    pub warning: Option<String>,
    pub attempts: u32,
    pub markers: MarkerCounts,
    pub created_at: DateTime<Utc>,
}

impl NewsDigest {
    pub fn new(
        query: &Query,
        source: DigestSource,
        raw: &str,
        verdict: Verdict,
        attempts: u32,
        markers: MarkerCounts,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();
        let (status, warning) = match verdict {
            Verdict::AcceptedWithWarning(warning) => {
                (DigestStatus::AcceptedWithWarning, Some(warning))
            }
            _ => (DigestStatus::Accepted, None),
        };

        Self {
            id: Uuid::new_v7(timestamp),
            query: query.to_string(),
            source,
            content: strip_completion_marker(raw),
            status,
            warning,
            attempts,
            markers,
            created_at: now,
        }
    }
}

fn strip_completion_marker(raw: &str) -> String {
    let trimmed = raw.trim_end();
    trimmed
        .strip_suffix(COMPLETION_MARKER)
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_topic() {
        let query = Query::parse("Top 10 Mumbai Business News Today").unwrap();
        assert_eq!(query.topic(), "Mumbai Business");

        let query = Query::parse("  Top 10 Sports News Today ").unwrap();
        assert_eq!(query.as_str(), "Top 10 Sports News Today");
        assert_eq!(query.topic(), "Sports");
    }

    #[test]
    fn test_query_rejects_invalid() {
        assert_eq!(
            Query::parse("Top 20 Sports News Today"),
            Err(CoreError::InvalidQuery)
        );
    }

    #[test]
    fn test_article_requires_title_and_url() {
        let mut article = NewsArticle {
            title: "Rain expected".to_string(),
            description: None,
            source: None,
            url: "https://news.example/rain".to_string(),
        };
        assert!(article.is_usable());

        article.url = " ".to_string();
        assert!(!article.is_usable());
    }

    #[test]
    fn test_digest_strips_completion_marker() {
        let query = Query::parse("Top 10 Sports News Today").unwrap();
        let digest = NewsDigest::new(
            &query,
            DigestSource::Model,
            &format!("1. **Match**\n---\n{}\n", COMPLETION_MARKER),
            Verdict::AcceptedWithWarning("9 of 10 items".to_string()),
            2,
            MarkerCounts::default(),
        );

        assert_eq!(digest.content, "1. **Match**\n---");
        assert_eq!(digest.status, DigestStatus::AcceptedWithWarning);
        assert_eq!(digest.warning.as_deref(), Some("9 of 10 items"));
        assert_eq!(digest.attempts, 2);
    }
}
