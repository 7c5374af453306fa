//! HTTP request handlers
//!
//! Implementation of HTTP endpoints for the project server.

use crate::{
    export::{CsvDownload, version_rows, versions_filename},
    server::app::AppState,
    types::{ErrorResponse, PingResponse, Version},
    utils::version,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Get version endpoint
///
/// GET /api/v1/projects/{project}/versions/{version}
pub async fn get_version(
    State(state): State<AppState>,
    Path((project, slug)): Path<(String, String)>,
) -> Result<Json<Version>, ApiError> {
    tracing::debug!("Looking up version {}/{}", project, slug);

    match state.versions.version_from_slug(&project, &slug).await {
        Ok(version) => Ok(Json(version)),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!("Failed to look up {}/{}: {}", project, slug, e);
            } else {
                tracing::info!("Version lookup {}/{}: {}", project, slug, e);
            }
            Err((status, Json(ErrorResponse::new(e.to_string()))))
        }
    }
}

/// Export versions endpoint
///
/// GET /api/v1/projects/{project}/versions.csv
///
/// Streams all versions of a project as a CSV attachment.
pub async fn export_versions(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Response, ApiError> {
    let versions = state.versions.list_versions(&project).await.map_err(|e| {
        tracing::error!("Failed to list versions of {}: {}", project, e);
        (status_for(&e), Json(ErrorResponse::new(e.to_string())))
    })?;

    tracing::info!("Exporting {} versions of {}", versions.len(), project);
    let filename = versions_filename(&project, chrono::Utc::now().date_naive());
    Ok(CsvDownload::new(filename, version_rows(versions)).into_response())
}

/// Map an error to the HTTP status reported to clients
fn status_for(error: &crate::Error) -> StatusCode {
    match error {
        crate::Error::NotFound { .. } => StatusCode::NOT_FOUND,
        crate::Error::Network(_) | crate::Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Ping endpoint for health checks
///
/// GET /ping
///
/// Returns server status and uptime information.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = PingResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Ping response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}
