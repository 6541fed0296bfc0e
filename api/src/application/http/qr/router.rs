use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    download_qr::{__path_download_qr, download_qr},
    generate_custom_qr::{__path_generate_custom_qr, generate_custom_qr},
    generate_qr::{__path_generate_qr, generate_qr},
};

#[derive(OpenApi)]
#[openapi(paths(generate_qr, generate_custom_qr, download_qr))]
pub struct QrApiDoc;

pub fn qr_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/generate-qr"), post(generate_qr))
        .route(
            &format!("{root_path}/generate-custom-qr"),
            post(generate_custom_qr),
        )
        .route(&format!("{root_path}/download-qr"), get(download_qr))
}
