use crate::domain::{
    common::retry::Verdict,
    news_digest::{
        DIGEST_ITEM_COUNT, entities::MarkerCounts, prompts::ITEM_DELIMITER,
        sponsors::SPONSOR_MARKER,
    },
};

const BOLD_MARKER: &str = "**";

/// How close to the expected item count a response has to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptancePolicy {
    /// Every marker count must equal the expected count.
    Strict,
    /// Exact counts are accepted; counts of at least `min_items` are accepted
    /// with a warning.
    Tolerant { min_items: usize },
}

impl AcceptancePolicy {
    pub const DEFAULT_TOLERANT_MIN_ITEMS: usize = 8;

    pub fn tolerant() -> Self {
        Self::tolerant_with(Self::DEFAULT_TOLERANT_MIN_ITEMS)
    }

    /// `min_items` is clamped to `1..=DIGEST_ITEM_COUNT`.
    pub fn tolerant_with(min_items: usize) -> Self {
        AcceptancePolicy::Tolerant {
            min_items: min_items.clamp(1, DIGEST_ITEM_COUNT),
        }
    }
}

/// Decides whether a model response is well formed enough to show.
#[cfg_attr(test, mockall::automock)]
pub trait ResponseValidator: Send + Sync {
    fn validate(&self, candidate: &str) -> Verdict;

    /// Marker counts reported alongside an accepted response.
    fn markers(&self, candidate: &str) -> MarkerCounts {
        count_markers(candidate)
    }
}

pub fn count_markers(text: &str) -> MarkerCounts {
    MarkerCounts {
        delimiters: text.matches(ITEM_DELIMITER).count(),
        headlines: text.matches(BOLD_MARKER).count() / 2,
        sponsors: text.matches(SPONSOR_MARKER).count(),
    }
}

/// Counts delimiters, bold headline pairs and sponsor markers. It never looks
/// at what the items say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCountValidator {
    pub expected: usize,
    pub policy: AcceptancePolicy,
}

impl MarkerCountValidator {
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            expected: DIGEST_ITEM_COUNT,
            policy,
        }
    }
}

impl Default for MarkerCountValidator {
    fn default() -> Self {
        Self::new(AcceptancePolicy::Strict)
    }
}

impl ResponseValidator for MarkerCountValidator {
    fn validate(&self, candidate: &str) -> Verdict {
        let counts = count_markers(candidate);

        if counts.all_equal(self.expected) {
            return Verdict::Accepted;
        }

        match self.policy {
            AcceptancePolicy::Tolerant { min_items }
                if counts.all_at_least(min_items.max(1).min(self.expected.max(1))) =>
            {
                Verdict::AcceptedWithWarning(format!(
                    "digest is incomplete ({counts}), expected {} items",
                    self.expected
                ))
            }
            _ => Verdict::Rejected(format!(
                "marker counts {counts} do not match expected {}",
                self.expected
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::news_digest::{prompts::COMPLETION_MARKER, sponsors::SPONSOR_LINES};

    /// A digest with `items` well formed blocks.
    pub fn digest_with_items(items: usize) -> String {
        let mut out = String::new();
        for i in 0..items {
            out.push_str(&format!(
                "{}. **Headline number {}**\nA short summary of what happened.\n{}\n---\n",
                i + 1,
                i + 1,
                SPONSOR_LINES[i % SPONSOR_LINES.len()]
            ));
        }
        out.push_str(COMPLETION_MARKER);
        out
    }
}
