use std::sync::LazyLock;

use regex::Regex;

pub const QUERY_HELP: &str = "Please enter a query like \"Top 10 Sports News Today\" or \"Top 10 Mumbai Business News Today\".";

static QUERY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Top 10 \w+(?:\s\w+)? (?:News Today|\w+\sNews Today)$")
        .expect("query pattern is valid")
});

/// A query is valid when it has the `Top 10 <Topic|City> [Topic] News Today`
/// shape and contains only ASCII characters.
pub fn is_valid_query(query: &str) -> bool {
    query.is_ascii() && QUERY_PATTERN.is_match(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_grammar() {
        for query in [
            "Top 10 Sports News Today",
            "Top 10 Mumbai Business News Today",
            "Top 10 New York News Today",
            "Top 10 New York Tech News Today",
            "Top 10 AI News Today",
        ] {
            assert!(is_valid_query(query), "{query} should be valid");
        }
    }

    #[test]
    fn test_rejects_wrong_shape() {
        for query in [
            "Top 20 Sports News Today",
            "Top 10 Sports News",
            "Top 10 Sports Headlines Today",
            "top 10 Sports News Today",
            "Top 10  Sports News Today",
            "Top 10 Sports News Today!",
            "Top 10 Very Long Topic Name News Today",
            "Top 10 News Today",
            "",
        ] {
            assert!(!is_valid_query(query), "{query:?} should be invalid");
        }
    }

    #[test]
    fn test_rejects_non_ascii_even_when_shape_matches() {
        let query = "Top 10 मुंबई News Today";

        assert!(!query.is_ascii());
        assert!(!is_valid_query(query));
        assert!(!is_valid_query("Top 10 Zürich News Today"));
    }
}
