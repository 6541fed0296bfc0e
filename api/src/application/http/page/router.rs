use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::index::{__path_index, index};

#[derive(OpenApi)]
#[openapi(paths(index))]
pub struct PageApiDoc;

pub fn page_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    let router = Router::new().route(&format!("{root_path}/"), get(index));

    if root_path.is_empty() {
        router
    } else {
        router.route(root_path, get(index))
    }
}
