/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use trackboard_api::{app::AppState, config::Config};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(config)?;
/// let app = trackboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use trackboard_shared::jira::{JiraClient, JiraError};
use trackboard_shared::policy::AggregationPolicy;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Both fields are cheap to clone and immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Upstream client
    pub jira: JiraClient,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state, building the upstream client
    pub fn new(config: Config) -> Result<Self, JiraError> {
        let jira = JiraClient::new(config.jira.clone())?;
        Ok(Self {
            jira,
            config: Arc::new(config),
        })
    }

    /// Gets the aggregation policy
    pub fn policy(&self) -> &AggregationPolicy {
        &self.config.policy
    }

    /// Gets the configured project key
    pub fn project_key(&self) -> &str {
        &self.config.project.key
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET /health                          # Liveness (no upstream call)
/// ├── GET /jira-versions                   # Unreleased versions
/// ├── GET /jira-statuses/:version_id       # Status counts of a version
/// ├── GET /jira-programs-progress          # Versions grouped by program
/// ├── GET /jira-programs-completion        # Completion per program
/// └── GET /jira-velocity/:board_id         # Committed vs. completed per sprint
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/jira-versions", get(routes::versions::list_versions))
        .route(
            "/jira-statuses/:version_id",
            get(routes::statuses::version_statuses),
        )
        .route(
            "/jira-programs-progress",
            get(routes::programs::programs_progress),
        )
        .route(
            "/jira-programs-completion",
            get(routes::programs::programs_completion),
        )
        .route(
            "/jira-velocity/:board_id",
            get(routes::velocity::velocity_trend),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Permissive CORS when `*` is configured, an explicit allow-list otherwise
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
