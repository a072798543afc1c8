/// Fix version model
///
/// A version is a named release milestone of a Jira project. Trackboard never
/// mutates versions; it only reads them from
/// `GET /rest/api/3/project/{key}/versions` and projects them into smaller
/// response shapes.
///
/// # Upstream shape
///
/// ```json
/// {
///   "id": "10021",
///   "name": "EMAR-1.4",
///   "archived": false,
///   "released": false,
///   "releaseDate": "2025-03-14"
/// }
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fix version as returned by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Upstream-assigned identifier (numeric, but transported as a string)
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the version has been released
    #[serde(default)]
    pub released: bool,

    /// Whether the version has been archived
    #[serde(default)]
    pub archived: bool,

    /// Planned or actual release date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,

    /// Start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Version {
    /// Projects the version to the list-endpoint shape
    pub fn summary(&self) -> VersionSummary {
        VersionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            release_date: self.release_date,
        }
    }

    /// Projects the version to the program-grouping shape
    pub fn program_entry(&self) -> ProgramVersion {
        ProgramVersion {
            name: self.name.clone(),
            release_date: self.release_date,
        }
    }
}

/// Version projection served by `GET /jira-versions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub id: String,
    pub name: String,
    pub release_date: Option<NaiveDate>,
}

/// Version projection served inside a program bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramVersion {
    pub name: String,
    pub release_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_version() {
        let version: Version = serde_json::from_value(json!({
            "id": "10000",
            "name": "EMAR-1"
        }))
        .unwrap();

        assert!(!version.released);
        assert!(!version.archived);
        assert!(version.release_date.is_none());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let version: Version = serde_json::from_value(json!({
            "id": "10001",
            "name": "MOBILE-2",
            "released": true,
            "archived": false,
            "releaseDate": "2025-03-14",
            "self": "https://example.atlassian.net/rest/api/3/version/10001"
        }))
        .unwrap();

        let value = serde_json::to_value(version.summary()).unwrap();
        assert_eq!(
            value,
            json!({"id": "10001", "name": "MOBILE-2", "releaseDate": "2025-03-14"})
        );
    }

    #[test]
    fn test_missing_release_date_serializes_as_null() {
        let version = Version {
            id: "1".to_string(),
            name: "SPRT-9".to_string(),
            description: None,
            released: false,
            archived: false,
            release_date: None,
            start_date: None,
        };

        let value = serde_json::to_value(version.program_entry()).unwrap();
        assert_eq!(value, json!({"name": "SPRT-9", "releaseDate": null}));
    }
}
