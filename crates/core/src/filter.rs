//! The issue list filter.
//!
//! A pure, order-preserving linear scan: four independent criteria combined
//! with logical AND, recomputed in full whenever the collection or any
//! criterion changes. No indexing, no pagination, no incremental updates.

use serde::Deserialize;

/// Sentinel value meaning "no constraint on this dimension".
pub const FILTER_ALL: &str = "All";

/// Anything the filter can look at: db rows and test fixtures both qualify.
pub trait Filterable {
    fn title(&self) -> &str;
    /// `None` (or empty) descriptions are defined to simply not match text.
    fn description(&self) -> Option<&str>;
    fn status(&self) -> &str;
    fn priority(&self) -> &str;
    fn severity(&self) -> &str;
}

/// The four filter criteria.
///
/// Empty `text` means no text constraint; the other three use the
/// [`FILTER_ALL`] sentinel. `Default` produces the unconstrained filter.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFilter {
    /// Free-text search, matched case-insensitively against title and
    /// description.
    #[serde(default)]
    pub text: String,
    #[serde(default = "all")]
    pub status: String,
    #[serde(default = "all")]
    pub priority: String,
    #[serde(default = "all")]
    pub severity: String,
}

fn all() -> String {
    FILTER_ALL.to_string()
}

impl Default for IssueFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            status: all(),
            priority: all(),
            severity: all(),
        }
    }
}

impl IssueFilter {
    /// Whether this filter constrains anything at all.
    pub fn is_unconstrained(&self) -> bool {
        self.text.is_empty()
            && self.status == FILTER_ALL
            && self.priority == FILTER_ALL
            && self.severity == FILTER_ALL
    }

    /// Whether a single issue passes all four criteria.
    pub fn matches<T: Filterable>(&self, issue: &T) -> bool {
        let text_match = self.text.is_empty() || {
            let needle = self.text.to_lowercase();
            issue.title().to_lowercase().contains(&needle)
                || issue
                    .description()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        };
        let status_match = self.status == FILTER_ALL || issue.status() == self.status;
        let priority_match = self.priority == FILTER_ALL || issue.priority() == self.priority;
        let severity_match = self.severity == FILTER_ALL || issue.severity() == self.severity;

        text_match && status_match && priority_match && severity_match
    }

    /// Produce the visible subset, preserving input order.
    pub fn apply<T: Filterable>(&self, issues: Vec<T>) -> Vec<T> {
        issues.into_iter().filter(|i| self.matches(i)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
