/// API route handlers
///
/// Each handler performs the same shape of work: call the tracker, reshape the
/// response, return JSON. Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `versions`: Unreleased fix versions of the project
/// - `statuses`: Issue status counts of one version
/// - `programs`: Versions and completion grouped by program category
/// - `velocity`: Committed vs. completed story points of recent sprints

pub mod health;
pub mod programs;
pub mod statuses;
pub mod velocity;
pub mod versions;
