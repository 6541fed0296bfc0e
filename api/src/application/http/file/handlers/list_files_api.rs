use axum::extract::State;
use cloudqr_core::domain::storage::{entities::FileListing, services::FileService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/files",
    tag = "file",
    summary = "List the most recent uploads",
    description = "Up to 50 files, newest first. Provider failures yield an empty list and an `error` message rather than an error status.",
    responses(
        (status = 200, description = "Files listed", body = FileListing)
    )
)]
pub async fn list_files_api(
    State(state): State<AppState>,
) -> Result<Response<FileListing>, ApiError> {
    let listing = state.service.list_files().await;

    Ok(Response::OK(listing))
}
