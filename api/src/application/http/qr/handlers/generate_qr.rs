use axum::extract::State;
use cloudqr_core::domain::{common::entities::app_errors::CoreError, qr::services::QrService};

use crate::application::http::{
    qr::validators::{GenerateQrRequest, GenerateQrResponse},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/generate-qr",
    tag = "qr",
    summary = "Generate a QR code for an uploaded file or any URL",
    description = "Encodes `cloudinaryUrl` when present, `customUrl` otherwise. URLs without a scheme are encoded as `https://`.",
    request_body = GenerateQrRequest,
    responses(
        (status = 200, description = "QR code generated", body = GenerateQrResponse),
        (status = 400, description = "Missing or invalid URL", body = ApiErrorResponse),
        (status = 500, description = "QR encoding failed", body = ApiErrorResponse)
    )
)]
pub async fn generate_qr(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateQrRequest>,
) -> Result<Response<GenerateQrResponse>, ApiError> {
    let (url, source) = payload.target().ok_or(CoreError::MissingUrl)?;

    let qr = state.service.generate_qr(url)?;

    Ok(Response::OK(GenerateQrResponse::new(qr, source)))
}
