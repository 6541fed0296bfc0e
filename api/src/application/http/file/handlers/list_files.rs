use axum::{Extension, extract::State, response::Html};
use cloudqr_core::domain::storage::services::FileService;

use crate::application::{
    client_middleware::ClientContext,
    http::server::{
        api_entities::api_error::ApiError,
        app_state::AppState,
        templates::{FILES_TEMPLATE, FilesPage},
    },
};

#[utoipa::path(
    get,
    path = "/files",
    tag = "file",
    summary = "Page listing the most recent uploads",
    responses(
        (status = 200, description = "HTML page", body = String, content_type = "text/html")
    )
)]
pub async fn list_files(
    State(state): State<AppState>,
    Extension(client): Extension<ClientContext>,
) -> Result<Html<String>, ApiError> {
    let listing = state.service.list_files().await;

    let page = FilesPage::new(
        &state.args.server.root_path,
        client.is_mobile,
        listing.files,
        listing.error,
    );

    state.templates.render(FILES_TEMPLATE, &page)
}
