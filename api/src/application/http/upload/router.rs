use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::upload_file::{__path_upload_file, upload_file};

#[derive(OpenApi)]
#[openapi(paths(upload_file))]
pub struct UploadApiDoc;

pub fn upload_routes(state: AppState) -> Router<AppState> {
    let body_limit = request_body_limit(state.service.upload_policy().max_bytes());

    Router::new()
        .route(
            &format!("{}/upload", state.args.server.root_path),
            post(upload_file),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Largest accepted request body: a base64 data URI of a file at the size
/// ceiling, plus room for the surrounding JSON or multipart framing.
fn request_body_limit(max_upload_bytes: u64) -> usize {
    let encoded = max_upload_bytes.div_ceil(3) * 4;
    usize::try_from(encoded + 1024 * 1024).unwrap_or(usize::MAX)
}
