use axum::{Router, extract::State, routing::get};
use chrono::{SecondsFormat, Utc};
use cloudqr_core::domain::health::HealthCheckService;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub storage: StorageStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StorageStatus {
    pub provider: String,
    /// `configured` or `not configured`
    pub cloud_name: String,
    pub credentials: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TestUploadResponse {
    pub message: String,
    /// RFC 3339
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Liveness and storage configuration",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Response<HealthResponse> {
    let report = state.service.health();

    Response::OK(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
        storage: StorageStatus {
            provider: report.provider,
            cloud_name: if report.cloud_name_configured {
                "configured"
            } else {
                "not configured"
            }
            .to_string(),
            credentials: report.credentials_configured,
        },
    })
}

#[utoipa::path(
    get,
    path = "/test-upload",
    tag = "health",
    summary = "Check that the upload endpoint is reachable",
    responses((status = 200, description = "Upload endpoint reachable", body = TestUploadResponse))
)]
pub async fn test_upload() -> Response<TestUploadResponse> {
    Response::OK(TestUploadResponse {
        message: "Upload endpoint is working".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[derive(OpenApi)]
#[openapi(paths(health, test_upload))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{root_path}/health"), get(health))
        .route(&format!("{root_path}/test-upload"), get(test_upload))
}
