use std::sync::Arc;

use crate::application::client_middleware::client_middleware;
use crate::application::http::error::{handle_panic, not_found};
use crate::application::http::file::router::file_routes;
use crate::application::http::health::health_routes;
use crate::application::http::page::router::page_routes;
use crate::application::http::qr::router::qr_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::api_doc;
use crate::application::http::server::templates::Templates;
use crate::application::http::upload::router::upload_routes;
use crate::args::Args;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use cloudqr_core::{application::create_service, domain::common::CloudQrConfig};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = CloudQrConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;
    let templates = Templates::new()?;

    Ok(AppState::new(args, service, templates))
}

/// Application routes with their middleware stack, without docs or metrics.
pub fn routes(state: AppState) -> Router {
    let root_path = state.args.server.root_path.clone();

    let app = Router::new()
        .merge(page_routes(state.clone()))
        .merge(upload_routes(state.clone()))
        .merge(qr_routes(state.clone()))
        .merge(file_routes(state.clone()))
        .merge(health_routes(&root_path));

    with_middleware(app, state)
}

fn with_middleware(app: Router<AppState>, state: AppState) -> Router {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    app.fallback(not_found)
        .layer(middleware::from_fn(client_middleware))
        .layer(trace_layer)
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let root_path = state.args.server.root_path.clone();

    let mut openapi = api_doc();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    openapi.paths = paths;

    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .merge(routes(state))
        .layer(prometheus_layer);

    Ok(router)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use clap::Parser;
    use serde_json::{Value, json};

    use super::*;

    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_json_error() {
        let args = Arc::new(Args::try_parse_from(["cloudqr"]).unwrap());
        let state = state(args).await.unwrap();
        let app = with_middleware(Router::new().route("/explode", get(explode)), state);
        let server = TestServer::new(app).unwrap();

        let response = server.get("/explode").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "error": "Internal server error" })
        );

        server
            .get("/still-alive")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
