/// Version status counts endpoint
///
/// # Endpoint
///
/// ```text
/// GET /jira-statuses/:version_id
/// ```
///
/// # Status Source
///
/// - `search` (default): JQL `fixVersion = <id>` against the search API,
///   tallying each issue's status name
/// - `report`: the version's HTML release report, tallying its status lozenges
///
/// # Response
///
/// ```json
/// { "Done": 12, "In Progress": 3, "To Do": 5 }
/// ```
///
/// # Errors
///
/// - 400: version id is not a plain alphanumeric identifier
/// - 500 `{ "error": "Failed to fetch issue statuses" }`: upstream failure

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use trackboard_shared::aggregate::{count_labels, count_statuses, StatusCounts};
use trackboard_shared::policy::StatusSource;
use trackboard_shared::report::status_labels;

const FAILURE: &str = "Failed to fetch issue statuses";

/// Rejects ids that could alter the JQL query or the report URL
pub fn validate_version_id(version_id: &str) -> ApiResult<()> {
    if version_id.is_empty() || !version_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::BadRequest(format!(
            "Invalid version id: {}",
            version_id
        )));
    }
    Ok(())
}

/// Status counts handler
pub async fn version_statuses(
    State(state): State<AppState>,
    Path(version_id): Path<String>,
) -> ApiResult<Json<StatusCounts>> {
    validate_version_id(&version_id)?;

    let counts = match state.policy().status_source {
        StatusSource::Search => {
            let jql = format!("fixVersion = {}", version_id);
            let issues = state
                .jira
                .search_issues(&jql, &["status"])
                .await
                .map_err(ApiError::upstream(FAILURE))?;
            count_statuses(&issues)
        }
        StatusSource::Report => {
            let html = state
                .jira
                .version_report_html(state.project_key(), &version_id)
                .await
                .map_err(ApiError::upstream(FAILURE))?;
            count_labels(status_labels(&html))
        }
    };

    tracing::debug!(
        version_id = %version_id,
        issues = counts.values().sum::<usize>(),
        "Counted version statuses"
    );

    Ok(Json(counts))
}
