/// Pure aggregation functions
///
/// Everything between "upstream JSON decoded" and "response JSON encoded"
/// lives here: filtering, categorisation, tallying, and the velocity and
/// completion arithmetic. None of it performs I/O, so every rule can be
/// tested without a network.
///
/// # Example
///
/// ```
/// use trackboard_shared::aggregate::{group_by_program, unreleased};
/// use trackboard_shared::models::Version;
/// use trackboard_shared::policy::AggregationPolicy;
///
/// let versions: Vec<Version> = serde_json::from_str(r#"[
///     {"id": "1", "name": "EMAR-1", "released": false},
///     {"id": "2", "name": "MOBILE-2", "released": true}
/// ]"#).unwrap();
///
/// let policy = AggregationPolicy::default();
/// let open = unreleased(versions, &policy);
/// assert_eq!(open.len(), 1);
///
/// let programs = group_by_program(&open, &policy);
/// assert_eq!(programs["EMAR"][0].name, "EMAR-1");
/// ```

use crate::models::{Issue, ProgramVersion, Sprint, SprintVelocity, Version};
use crate::policy::{AggregationPolicy, CategoryRule, StatusKeywords};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status name -> number of issues
pub type StatusCounts = BTreeMap<String, usize>;

/// Program category -> versions in that category
pub type ProgramGroups = BTreeMap<String, Vec<ProgramVersion>>;

/// Completion bucket of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Done,
    InProgress,
    Todo,
}

/// Done / in-progress / todo tally of a program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCompletion {
    pub done: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub total: usize,

    /// `None` when the program has no issues
    pub percent_complete: Option<f64>,
}

/// Keeps versions that are neither released nor (per policy) archived
pub fn unreleased(versions: Vec<Version>, policy: &AggregationPolicy) -> Vec<Version> {
    versions
        .into_iter()
        .filter(|v| !v.released && !(policy.exclude_archived && v.archived))
        .collect()
}

fn starts_with(name: &str, prefix: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    } else {
        name.starts_with(prefix)
    }
}

/// Maps a version name to its program category
///
/// With [`CategoryRule::Prefixes`] the first rule whose prefix matches wins;
/// with [`CategoryRule::Delimiter`] the trimmed text before the first
/// delimiter is the category (the whole name when there is no delimiter,
/// upper-cased when `case_insensitive`). Names that produce no category fall
/// into the rule's fallback.
pub fn categorize(name: &str, rule: &CategoryRule, case_insensitive: bool) -> String {
    match rule {
        CategoryRule::Prefixes { rules, fallback } => rules
            .iter()
            .find(|r| starts_with(name, &r.prefix, case_insensitive))
            .map(|r| r.category.clone())
            .unwrap_or_else(|| fallback.clone()),
        CategoryRule::Delimiter {
            delimiter,
            fallback,
        } => {
            let head = match delimiter.as_str() {
                "" => name,
                d => name.split(d).next().unwrap_or(name),
            };
            let head = head.trim();

            if head.is_empty() {
                fallback.clone()
            } else if case_insensitive {
                head.to_uppercase()
            } else {
                head.to_string()
            }
        }
    }
}

/// Groups versions into program buckets, keeping upstream order per bucket
pub fn group_by_program(versions: &[Version], policy: &AggregationPolicy) -> ProgramGroups {
    let mut programs = ProgramGroups::new();
    for version in versions {
        let category = categorize(
            &version.name,
            &policy.category_rule,
            policy.case_insensitive_prefixes,
        );
        programs
            .entry(category)
            .or_default()
            .push(version.program_entry());
    }
    programs
}

/// Groups version ids by program category
pub fn version_ids_by_program(
    versions: &[Version],
    policy: &AggregationPolicy,
) -> BTreeMap<String, Vec<String>> {
    let mut ids: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for version in versions {
        let category = categorize(
            &version.name,
            &policy.category_rule,
            policy.case_insensitive_prefixes,
        );
        ids.entry(category).or_default().push(version.id.clone());
    }
    ids
}

/// Tallies issues per status name
pub fn count_statuses(issues: &[Issue]) -> StatusCounts {
    count_labels(issues.iter().map(Issue::status_name))
}

/// Tallies arbitrary status labels
pub fn count_labels<I, S>(labels: I) -> StatusCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = StatusCounts::new();
    for label in labels {
        *counts.entry(label.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Places a status name into a completion bucket
pub fn classify_status(name: &str, keywords: &StatusKeywords) -> StatusBucket {
    let name = name.to_lowercase();
    let matches = |list: &[String]| list.iter().any(|k| name.contains(&k.to_lowercase()));

    if matches(&keywords.done) {
        StatusBucket::Done
    } else if matches(&keywords.in_progress) {
        StatusBucket::InProgress
    } else {
        StatusBucket::Todo
    }
}

/// `done / total * 100` rounded to one decimal place
///
/// Returns `None` for an empty program.
pub fn percent_complete(done: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let percent = done as f64 / total as f64 * 100.0;
    Some((percent * 10.0).round() / 10.0)
}

/// Buckets issues by status and computes the completion percentage
pub fn completion(issues: &[Issue], keywords: &StatusKeywords) -> ProgramCompletion {
    let mut result = ProgramCompletion::default();
    for issue in issues {
        match classify_status(issue.status_name(), keywords) {
            StatusBucket::Done => result.done += 1,
            StatusBucket::InProgress => result.in_progress += 1,
            StatusBucket::Todo => result.todo += 1,
        }
    }
    result.total = issues.len();
    result.percent_complete = percent_complete(result.done, result.total);
    result
}

/// Selects the most recent closed sprints of a board
///
/// Sprints whose name does not start with `prefix` are dropped (no prefix
/// keeps all). The rest are ordered most recent first by
/// [`Sprint::finished_at`], undated sprints last, ties broken by descending
/// id, and truncated to `limit`.
pub fn recent_sprints(
    sprints: Vec<Sprint>,
    prefix: Option<&str>,
    limit: usize,
    case_insensitive: bool,
) -> Vec<Sprint> {
    let mut selected: Vec<Sprint> = sprints
        .into_iter()
        .filter(|s| prefix.map_or(true, |p| starts_with(&s.name, p, case_insensitive)))
        .collect();

    // Option orders None < Some, so reversing puts undated sprints last
    selected.sort_by(|a, b| {
        b.finished_at()
            .cmp(&a.finished_at())
            .then_with(|| b.id.cmp(&a.id))
    });
    selected.truncate(limit);
    selected
}

/// Sums committed and completed story points of one sprint
pub fn sprint_velocity(sprint: &Sprint, issues: &[Issue], story_points_field: &str) -> SprintVelocity {
    let mut committed = 0.0;
    let mut completed = 0.0;
    for issue in issues {
        let points = issue.story_points(story_points_field);
        committed += points;
        if issue.is_done() {
            completed += points;
        }
    }

    SprintVelocity {
        sprint_id: sprint.id,
        name: sprint.name.clone(),
        end_date: sprint.end_date,
        committed,
        completed,
        issue_count: issues.len(),
    }
}
