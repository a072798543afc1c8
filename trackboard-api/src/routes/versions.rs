/// Unreleased versions endpoint
///
/// # Endpoint
///
/// ```text
/// GET /jira-versions
/// ```
///
/// # Response
///
/// Versions of the configured project that are not released (and, unless the
/// policy keeps them, not archived), in upstream order:
///
/// ```json
/// [
///   { "id": "10021", "name": "EMAR-1.4", "releaseDate": "2025-03-14" },
///   { "id": "10022", "name": "MOBILE-2.0", "releaseDate": null }
/// ]
/// ```
///
/// # Errors
///
/// - 500 `{ "error": "Failed to fetch Jira versions" }`: upstream failure

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, Json};
use trackboard_shared::aggregate::unreleased;
use trackboard_shared::models::VersionSummary;

const FAILURE: &str = "Failed to fetch Jira versions";

/// List unreleased versions handler
pub async fn list_versions(State(state): State<AppState>) -> ApiResult<Json<Vec<VersionSummary>>> {
    let versions = state
        .jira
        .project_versions(state.project_key())
        .await
        .map_err(ApiError::upstream(FAILURE))?;

    let total = versions.len();
    let summaries: Vec<VersionSummary> = unreleased(versions, state.policy())
        .iter()
        .map(|v| v.summary())
        .collect();

    tracing::debug!(
        project = state.project_key(),
        total,
        unreleased = summaries.len(),
        "Listed versions"
    );

    Ok(Json(summaries))
}
