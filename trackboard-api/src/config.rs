/// Configuration management for the API server
///
/// This module loads configuration from environment variables once at startup
/// and provides a type-safe configuration struct. The value is handed to
/// [`AppState`](crate::app::AppState); handlers never read the environment.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT` / `API_PORT`: Port to bind to (default: 3001)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `JIRA_BASE_URL` / `JIRA_CLOUD_INSTANCE`: Upstream site (one required)
/// - `JIRA_EMAIL` + `JIRA_API_TOKEN`, or `JIRA_BEARER_TOKEN`: Credentials (required)
/// - `JIRA_PROJECT_KEY`: Project whose versions are listed (default: CR)
/// - `JIRA_BOARD_PREFIXES`: `board_id=prefix` pairs, comma-separated
/// - `JIRA_STORY_POINTS_FIELD`: Story point field id (default: customfield_10016)
/// - `JIRA_STATUS_SOURCE`: `search` or `report` (default: search)
/// - `JIRA_EXCLUDE_ARCHIVED`: Hide archived versions (default: true)
/// - `PROGRAM_PREFIX_CASE_INSENSITIVE`: Ignore case in name prefixes (default: true)
/// - `PROGRAM_CATEGORY_DELIMITER`: Categorise by delimiter instead of fixed prefixes
/// - `VELOCITY_SPRINT_LIMIT`: Sprints in the velocity trend (default: 6)
/// - `UPSTREAM_FAN_OUT`: Concurrent upstream requests per endpoint (default: 4)
/// - `UPSTREAM_TIMEOUT_SECS`: Upstream request timeout (default: 30)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use trackboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use trackboard_shared::jira::JiraConfig;
use trackboard_shared::policy::{AggregationPolicy, CategoryRule, StatusSource};

/// Default listening port
pub const DEFAULT_PORT: u16 = 3001;

/// Default project key
pub const DEFAULT_PROJECT_KEY: &str = "CR";

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Upstream site and credentials
    pub jira: JiraConfig,

    /// Project and board settings
    pub project: ProjectConfig,

    /// Filtering and classification rules
    pub policy: AggregationPolicy,
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,
}

/// Project and board settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project whose versions are listed and grouped
    pub key: String,

    /// Sprint name prefix per board id
    pub board_prefixes: HashMap<u64, String>,
}

impl ProjectConfig {
    /// Sprint name prefix configured for a board
    pub fn board_prefix(&self, board_id: u64) -> Option<&str> {
        self.board_prefixes.get(&board_id).map(String::as_str)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Credentials or the upstream site are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let jira = JiraConfig::from_lookup(&lookup)?;

        let api_host = get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let api_port = parse_or("PORT", get("PORT").or_else(|| get("API_PORT")), DEFAULT_PORT)?;
        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let project = ProjectConfig {
            key: get("JIRA_PROJECT_KEY").unwrap_or_else(|| DEFAULT_PROJECT_KEY.to_string()),
            board_prefixes: match get("JIRA_BOARD_PREFIXES") {
                Some(raw) => parse_board_prefixes(&raw)?,
                None => HashMap::new(),
            },
        };

        let defaults = AggregationPolicy::default();
        let case_insensitive_prefixes = parse_bool(
            "PROGRAM_PREFIX_CASE_INSENSITIVE",
            get("PROGRAM_PREFIX_CASE_INSENSITIVE"),
            defaults.case_insensitive_prefixes,
        )?;
        let category_rule = match lookup("PROGRAM_CATEGORY_DELIMITER").filter(|d| !d.is_empty()) {
            Some(delimiter) => CategoryRule::Delimiter {
                delimiter,
                fallback: defaults.category_rule.fallback().to_string(),
            },
            None => defaults.category_rule.clone(),
        };

        let policy = AggregationPolicy {
            exclude_archived: parse_bool(
                "JIRA_EXCLUDE_ARCHIVED",
                get("JIRA_EXCLUDE_ARCHIVED"),
                defaults.exclude_archived,
            )?,
            case_insensitive_prefixes,
            category_rule,
            story_points_field: get("JIRA_STORY_POINTS_FIELD")
                .unwrap_or_else(|| defaults.story_points_field.clone()),
            status_keywords: defaults.status_keywords.clone(),
            sprint_limit: parse_or("VELOCITY_SPRINT_LIMIT", get("VELOCITY_SPRINT_LIMIT"), defaults.sprint_limit)?,
            fan_out: parse_or("UPSTREAM_FAN_OUT", get("UPSTREAM_FAN_OUT"), defaults.fan_out)?,
            status_source: match get("JIRA_STATUS_SOURCE") {
                Some(raw) => StatusSource::from_str(&raw).map_err(anyhow::Error::msg)?,
                None => defaults.status_source,
            },
        };

        if policy.fan_out == 0 {
            anyhow::bail!("UPSTREAM_FAN_OUT must be at least 1");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            jira,
            project,
            policy,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T> {
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", name, raw)),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, raw: Option<String>, default: bool) -> anyhow::Result<bool> {
    match raw.map(|v| v.to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => anyhow::bail!("{} must be a boolean, got {}", name, v),
    }
}

/// Parses `12=EMAR,34=MOB` into a board id -> prefix map
fn parse_board_prefixes(raw: &str) -> anyhow::Result<HashMap<u64, String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> anyhow::Result<(u64, String)> {
            let (board, prefix) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("JIRA_BOARD_PREFIXES entry is not board=prefix: {}", pair))?;
            let board = board
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("JIRA_BOARD_PREFIXES board id is not a number: {}", board))?;
            Ok((board, prefix.trim().to_string()))
        })
        .collect()
}
