//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::{Result, config::Settings, lookup::VersionSource};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Version lookup backend, fixed at startup
    pub versions: Arc<dyn VersionSource>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(versions: Arc<dyn VersionSource>) -> Self {
        Self {
            versions,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Create the main Axum application, selecting the version source from settings
pub fn create_app(settings: Settings) -> Result<Router> {
    let versions = crate::lookup::version_source(&settings)?;
    Ok(router(AppState::new(versions)))
}

/// Build the router around an existing state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(super::handlers::ping))
        .route(
            "/api/v1/projects/{project}/versions/{version}",
            get(super::handlers::get_version),
        )
        .route(
            "/api/v1/projects/{project}/versions.csv",
            get(super::handlers::export_versions),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
