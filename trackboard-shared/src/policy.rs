/// Aggregation policy
///
/// Filtering and classification rules that differ between deployments are
/// collected into one [`AggregationPolicy`] value. It is built once from
/// configuration and handed to every handler; the aggregation functions take
/// it (or one of its parts) as an argument.
///
/// # Example
///
/// ```
/// use trackboard_shared::policy::{AggregationPolicy, CategoryRule};
///
/// let policy = AggregationPolicy {
///     category_rule: CategoryRule::Delimiter {
///         delimiter: "-".to_string(),
///         fallback: "Others".to_string(),
///     },
///     ..AggregationPolicy::default()
/// };
/// assert!(policy.exclude_archived);
/// ```

use serde::{Deserialize, Serialize};

/// Default custom field holding story points on Jira Cloud
pub const DEFAULT_STORY_POINTS_FIELD: &str = "customfield_10016";

/// Default number of sprints in the velocity trend
pub const DEFAULT_SPRINT_LIMIT: usize = 6;

/// Default number of concurrent upstream requests per fan-out
pub const DEFAULT_FAN_OUT: usize = 4;

/// Catch-all program category
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Others";

/// Where status counts for a version come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    /// JQL search against the REST API
    #[default]
    Search,

    /// Status lozenges scraped from the release report page
    Report,
}

impl std::str::FromStr for StatusSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(StatusSource::Search),
            "report" => Ok(StatusSource::Report),
            other => Err(format!("unknown status source: {}", other)),
        }
    }
}

/// How a version name maps to a program category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CategoryRule {
    /// First matching name prefix wins
    Prefixes {
        rules: Vec<PrefixRule>,
        fallback: String,
    },

    /// Text before the first delimiter is the category
    Delimiter { delimiter: String, fallback: String },
}

impl CategoryRule {
    /// The catch-all category of this rule
    pub fn fallback(&self) -> &str {
        match self {
            CategoryRule::Prefixes { fallback, .. } => fallback,
            CategoryRule::Delimiter { fallback, .. } => fallback,
        }
    }
}

impl Default for CategoryRule {
    fn default() -> Self {
        CategoryRule::Prefixes {
            rules: vec![
                PrefixRule::new("emar", "EMAR"),
                PrefixRule::new("mobile", "Mobile"),
                PrefixRule::new("sprt", "Support Tool"),
                PrefixRule::new("pprt", "Pharmacy Portal"),
            ],
            fallback: DEFAULT_FALLBACK_CATEGORY.to_string(),
        }
    }
}

/// A single `prefix -> category` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    pub prefix: String,
    pub category: String,
}

impl PrefixRule {
    pub fn new(prefix: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            category: category.into(),
        }
    }
}

/// Substrings that place a status name into a completion bucket
///
/// Matching is case-insensitive. Done keywords are checked before
/// in-progress keywords; a status matching neither is todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusKeywords {
    pub done: Vec<String>,
    pub in_progress: Vec<String>,
}

impl Default for StatusKeywords {
    fn default() -> Self {
        Self {
            done: ["done", "closed", "resolved", "released"]
                .into_iter()
                .map(String::from)
                .collect(),
            in_progress: ["progress", "review", "test", "qa"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Complete aggregation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPolicy {
    /// Drop archived versions in addition to released ones
    pub exclude_archived: bool,

    /// Compare name prefixes ignoring ASCII case
    pub case_insensitive_prefixes: bool,

    /// Program categorisation rule
    pub category_rule: CategoryRule,

    /// Field id holding the numeric estimate
    pub story_points_field: String,

    /// Status-name keywords for completion buckets
    pub status_keywords: StatusKeywords,

    /// Maximum number of sprints in the velocity trend
    pub sprint_limit: usize,

    /// Maximum concurrent upstream requests in one fan-out
    pub fan_out: usize,

    /// Source of per-version status counts
    pub status_source: StatusSource,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            exclude_archived: true,
            case_insensitive_prefixes: true,
            category_rule: CategoryRule::default(),
            story_points_field: DEFAULT_STORY_POINTS_FIELD.to_string(),
            status_keywords: StatusKeywords::default(),
            sprint_limit: DEFAULT_SPRINT_LIMIT,
            fan_out: DEFAULT_FAN_OUT,
            status_source: StatusSource::default(),
        }
    }
}

impl AggregationPolicy {
    /// Fan-out width, never below one
    pub fn concurrency(&self) -> usize {
        self.fan_out.max(1)
    }
}
