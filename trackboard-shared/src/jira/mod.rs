/// Jira Cloud integration
///
/// Trackboard's only outbound dependency. The client issues authenticated
/// GET requests against the platform REST API (v3), the agile API (1.0),
/// and the HTML release report of a version.
///
/// ```text
/// handler ──> JiraClient ──GET──> /rest/api/3/project/{key}/versions
///                         ──GET──> /rest/api/3/search?jql=..
///                         ──GET──> /rest/agile/1.0/board/{id}/sprint
///                         ──GET──> /rest/agile/1.0/sprint/{id}/issue
///                         ──GET──> /projects/{key}/versions/{id}/tab/...
/// ```

pub mod client;

pub use client::{JiraClient, JiraConfig, JiraCredentials, JiraError};
