/// Program endpoints
///
/// Programs are coarse groupings of versions derived from their names (see
/// [`categorize`](trackboard_shared::aggregate::categorize)). Only unreleased
/// versions take part.
///
/// # Endpoints
///
/// ```text
/// GET /jira-programs-progress
/// GET /jira-programs-completion
/// ```
///
/// # Responses
///
/// Progress lists the versions of each program:
///
/// ```json
/// {
///   "EMAR": [{ "name": "EMAR-1.4", "releaseDate": "2025-03-14" }],
///   "Others": [{ "name": "Infra-7", "releaseDate": null }]
/// }
/// ```
///
/// Completion buckets the issues of each program's versions by status:
///
/// ```json
/// {
///   "EMAR": { "done": 6, "inProgress": 2, "todo": 4, "total": 12, "percentComplete": 50.0 }
/// }
/// ```

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, Json};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeMap;
use trackboard_shared::aggregate::{
    completion, group_by_program, unreleased, version_ids_by_program, ProgramCompletion,
    ProgramGroups,
};
use trackboard_shared::jira::JiraError;

const PROGRESS_FAILURE: &str = "Failed to fetch Jira programs";
const COMPLETION_FAILURE: &str = "Failed to fetch program completion";

/// Program progress handler
pub async fn programs_progress(State(state): State<AppState>) -> ApiResult<Json<ProgramGroups>> {
    let versions = state
        .jira
        .project_versions(state.project_key())
        .await
        .map_err(ApiError::upstream(PROGRESS_FAILURE))?;

    let open = unreleased(versions, state.policy());
    let programs = group_by_program(&open, state.policy());

    tracing::debug!(
        versions = open.len(),
        programs = programs.len(),
        "Grouped versions by program"
    );

    Ok(Json(programs))
}

/// Program completion handler
///
/// Issues one search per program, at most `fan_out` at a time.
pub async fn programs_completion(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<String, ProgramCompletion>>> {
    let versions = state
        .jira
        .project_versions(state.project_key())
        .await
        .map_err(ApiError::upstream(COMPLETION_FAILURE))?;

    let policy = state.policy();
    let open = unreleased(versions, policy);
    let groups = version_ids_by_program(&open, policy);

    let jira = &state.jira;
    let keywords = &policy.status_keywords;

    let results: Vec<(String, ProgramCompletion)> = stream::iter(groups)
        .map(|(program, ids)| async move {
            let jql = format!("fixVersion in ({})", ids.join(","));
            let issues = jira.search_issues(&jql, &["status"]).await?;
            Ok::<_, JiraError>((program, completion(&issues, keywords)))
        })
        .buffered(policy.concurrency())
        .try_collect()
        .await
        .map_err(ApiError::upstream(COMPLETION_FAILURE))?;

    Ok(Json(results.into_iter().collect()))
}
