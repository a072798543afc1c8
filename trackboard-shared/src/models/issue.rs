/// Issue model
///
/// Only the fields Trackboard aggregates over are typed: the status (with its
/// category) and an optional numeric estimate. Every other requested field is
/// kept in a raw JSON map, since the story-point custom field differs between
/// Jira sites and is chosen at runtime.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Status category key Jira assigns to every "done" status
pub const DONE_CATEGORY_KEY: &str = "done";

/// A single issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key, e.g. `CR-123`
    #[serde(default)]
    pub key: String,

    /// Requested fields
    pub fields: IssueFields,
}

/// Requested issue fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    /// Workflow status
    pub status: Status,

    /// All other fields, keyed by field id
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Workflow status of an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Display name, e.g. "In Review"
    pub name: String,

    /// Coarse category (`new`, `indeterminate`, `done`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_category: Option<StatusCategory>,
}

/// Jira status category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCategory {
    pub key: String,
}

impl Issue {
    /// Returns the status display name
    pub fn status_name(&self) -> &str {
        &self.fields.status.name
    }

    /// Whether the status belongs to the `done` category
    pub fn is_done(&self) -> bool {
        self.fields
            .status
            .status_category
            .as_ref()
            .is_some_and(|category| category.key == DONE_CATEGORY_KEY)
    }

    /// Reads the numeric estimate from `field`
    ///
    /// Missing, null, and non-numeric values count as zero.
    pub fn story_points(&self, field: &str) -> f64 {
        self.fields
            .extra
            .get(field)
            .and_then(JsonValue::as_f64)
            .unwrap_or(0.0)
    }
}

/// One page of a paginated issue listing
///
/// Shared by the platform search endpoint and the agile sprint-issue endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePage {
    #[serde(default)]
    pub start_at: u64,

    #[serde(default)]
    pub max_results: u64,

    #[serde(default)]
    pub total: u64,

    pub issues: Vec<Issue>,
}
