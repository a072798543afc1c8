/// Velocity trend endpoint
///
/// # Endpoint
///
/// ```text
/// GET /jira-velocity/:board_id
/// ```
///
/// Takes the board's closed sprints whose name starts with the prefix
/// configured for that board (all sprints if none is configured), keeps the
/// `sprint_limit` most recent, and sums story points per sprint:
/// - committed: every issue in the sprint
/// - completed: issues whose status is in the `done` category
///
/// Per-sprint issue fetches run at most `fan_out` at a time; the response is
/// always most recent sprint first.
///
/// # Response
///
/// ```json
/// [
///   { "sprintId": 42, "name": "EMAR Sprint 12", "endDate": "2025-01-20T09:00:00Z",
///     "committed": 34.0, "completed": 29.0, "issueCount": 17 }
/// ]
/// ```
///
/// # Errors
///
/// - 400: board id is not a number
/// - 500 `{ "error": "Failed to fetch sprint velocity" }`: upstream failure

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use trackboard_shared::aggregate::{recent_sprints, sprint_velocity};
use trackboard_shared::jira::JiraError;
use trackboard_shared::models::SprintVelocity;

const FAILURE: &str = "Failed to fetch sprint velocity";

/// Velocity trend handler
pub async fn velocity_trend(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> ApiResult<Json<Vec<SprintVelocity>>> {
    let board_id: u64 = board_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid board id: {}", board_id)))?;

    let policy = state.policy();
    let sprints = state
        .jira
        .closed_sprints(board_id)
        .await
        .map_err(ApiError::upstream(FAILURE))?;

    let prefix = state.config.project.board_prefix(board_id);
    let selected = recent_sprints(
        sprints,
        prefix,
        policy.sprint_limit,
        policy.case_insensitive_prefixes,
    );

    let jira = &state.jira;
    let points_field = policy.story_points_field.as_str();
    let fields = ["status", points_field];
    let fields = &fields;

    // buffered() yields in input order, so the trend stays most-recent-first
    let trend: Vec<SprintVelocity> = stream::iter(selected)
        .map(|sprint| async move {
            let issues = jira.sprint_issues(sprint.id, fields).await?;
            Ok::<_, JiraError>(sprint_velocity(&sprint, &issues, points_field))
        })
        .buffered(policy.concurrency())
        .try_collect()
        .await
        .map_err(ApiError::upstream(FAILURE))?;

    tracing::debug!(board_id, prefix = ?prefix, sprints = trend.len(), "Computed velocity trend");

    Ok(Json(trend))
}
