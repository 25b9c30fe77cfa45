use chrono::NaiveDate;

use crate::domain::news_digest::{
    DIGEST_ITEM_COUNT,
    entities::{NewsArticle, Query},
};

pub const ITEM_DELIMITER: &str = "---";
pub const COMPLETION_MARKER: &str = "END OF DIGEST";

pub const DIGEST_SYSTEM_PROMPT: &str = "You are a concise news editor. You write crisp, \
factual digests in plain English markdown and follow the requested output format exactly.";

/// Prompt pair sent for one digest request. Identical across retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPrompt {
    pub system: String,
    pub user: String,
}

pub fn build_digest_prompt(
    query: &Query,
    today: NaiveDate,
    sponsors: &[&str],
    articles: Option<&[NewsArticle]>,
) -> DigestPrompt {
    let mut user = format!(
        "Today is {date}. Write \"{query}\": the {count} most important news stories about {topic}.\n\n",
        date = today.format("%B %d, %Y"),
        query = query,
        count = DIGEST_ITEM_COUNT,
        topic = query.topic(),
    );

    if let Some(articles) = articles {
        user.push_str("Use only the following articles. Do not invent stories or sources.\n\n");
        for (index, article) in articles.iter().enumerate() {
            user.push_str(&format!("{}. {}", index + 1, article.title));
            if let Some(source) = article.source.as_deref().filter(|s| !s.is_empty()) {
                user.push_str(&format!(" ({source})"));
            }
            user.push('\n');
            if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
                user.push_str(&format!("   {description}\n"));
            }
            user.push_str(&format!("   {}\n", article.url));
        }
        user.push('\n');
    }

    user.push_str(&format!(
        "Format every item exactly like this:\n\
         <number>. **<headline>**\n\
         <two or three sentence summary>\n\
         <sponsor line>\n\
         {ITEM_DELIMITER}\n\n\
         Write exactly {DIGEST_ITEM_COUNT} items. Put one bold headline per item and no other bold text. \
         Copy the sponsor lines below verbatim, one per item, in this order:\n"
    ));
    for (index, sponsor) in sponsors.iter().enumerate() {
        user.push_str(&format!("{}. {}\n", index + 1, sponsor));
    }
    user.push_str(&format!(
        "\nEnd each item with a line containing only {ITEM_DELIMITER}. \
         After the last item write {COMPLETION_MARKER} on its own line and nothing else."
    ));

    DigestPrompt {
        system: DIGEST_SYSTEM_PROMPT.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::news_digest::sponsors::SPONSOR_LINES;

    fn query() -> Query {
        Query::parse("Top 10 Mumbai Business News Today").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    #[test]
    fn test_prompt_embeds_query_date_and_sponsors() {
        let prompt = build_digest_prompt(&query(), today(), &SPONSOR_LINES, None);

        assert!(prompt.user.contains("Today is March 04, 2026."));
        assert!(prompt.user.contains("\"Top 10 Mumbai Business News Today\""));
        assert!(prompt.user.contains("about Mumbai Business"));
        assert!(prompt.user.ends_with("END OF DIGEST on its own line and nothing else."));
        for sponsor in SPONSOR_LINES {
            assert!(prompt.user.contains(sponsor));
        }
        assert!(!prompt.user.contains("Use only the following articles"));
    }

    #[test]
    fn test_live_prompt_lists_articles() {
        let articles = vec![NewsArticle {
            title: "Sensex closes higher".to_string(),
            description: Some("Banks led the rally.".to_string()),
            source: Some("Mint".to_string()),
            url: "https://news.example/sensex".to_string(),
        }];

        let prompt = build_digest_prompt(&query(), today(), &SPONSOR_LINES, Some(&articles));

        assert!(prompt.user.contains("1. Sensex closes higher (Mint)\n"));
        assert!(prompt.user.contains("   Banks led the rally.\n"));
        assert!(prompt.user.contains("   https://news.example/sensex\n"));
    }
}
