/// Sprint model
///
/// Sprints come from the agile API (`/rest/agile/1.0/board/{id}/sprint`).
/// Only closed sprints feed the velocity trend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sprint lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Future,
    Active,
    Closed,
}

/// A sprint on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,

    pub name: String,

    pub state: SprintState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// When the sprint was actually closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<DateTime<Utc>>,
}

impl Sprint {
    /// Timestamp used to order sprints chronologically
    ///
    /// Falls back from the completion date to the planned end and start dates.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.complete_date.or(self.end_date).or(self.start_date)
    }
}

/// One page of the board sprint listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintPage {
    #[serde(default)]
    pub start_at: u64,

    #[serde(default)]
    pub max_results: u64,

    /// Missing on some server versions; treated as the last page
    #[serde(default = "default_is_last")]
    pub is_last: bool,

    pub values: Vec<Sprint>,
}

fn default_is_last() -> bool {
    true
}

/// Committed vs. completed story points of one sprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintVelocity {
    pub sprint_id: u64,

    pub name: String,

    pub end_date: Option<DateTime<Utc>>,

    /// Story points of every issue in the sprint
    pub committed: f64,

    /// Story points of issues in the `done` status category
    pub completed: f64,

    pub issue_count: usize,
}
