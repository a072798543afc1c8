/// Upstream data models
///
/// Read-only projections of the tracker's REST schema plus the response
/// shapes Trackboard serves. Nothing here outlives a single request.
///
/// - `version`: fix versions and their projections
/// - `issue`: issues, statuses, and paginated issue listings
/// - `sprint`: board sprints and per-sprint velocity

pub mod issue;
pub mod sprint;
pub mod version;

pub use issue::{Issue, IssueFields, IssuePage, Status, StatusCategory};
pub use sprint::{Sprint, SprintPage, SprintState, SprintVelocity};
pub use version::{ProgramVersion, Version, VersionSummary};
