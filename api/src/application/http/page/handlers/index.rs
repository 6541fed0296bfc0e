use axum::{Extension, extract::State, response::Html};

use crate::application::{
    client_middleware::ClientContext,
    http::server::{
        api_entities::api_error::ApiError,
        app_state::AppState,
        templates::{INDEX_TEMPLATE, IndexPage},
    },
};

#[utoipa::path(
    get,
    path = "/",
    tag = "page",
    summary = "Upload page",
    responses(
        (status = 200, description = "HTML page", body = String, content_type = "text/html")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    Extension(client): Extension<ClientContext>,
) -> Result<Html<String>, ApiError> {
    let page = IndexPage::new(
        &state.args.server.root_path,
        client.is_mobile,
        state.service.upload_policy().max_bytes(),
    );

    state.templates.render(INDEX_TEMPLATE, &page)
}
