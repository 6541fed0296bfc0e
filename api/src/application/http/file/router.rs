use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    list_files::{__path_list_files, list_files},
    list_files_api::{__path_list_files_api, list_files_api},
};

#[derive(OpenApi)]
#[openapi(paths(list_files, list_files_api))]
pub struct FileApiDoc;

pub fn file_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/files"), get(list_files))
        .route(&format!("{root_path}/api/files"), get(list_files_api))
}
