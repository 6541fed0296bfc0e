use std::any::Any;

use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Turns a handler panic into the standard JSON error body.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };

    error!(panic = %detail, "Handler panicked");

    ApiError::internal().into_response()
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode};
    use serde_json::{Value, json};

    use super::*;

    #[tokio::test]
    async fn test_panic_becomes_json_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": "Internal server error" })
        );
    }
}
