use axum::extract::State;
use cloudqr_core::domain::qr::services::QrService;

use crate::application::http::{
    qr::validators::{GenerateCustomQrRequest, GenerateQrResponse},
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
    path = "/generate-custom-qr",
    tag = "qr",
    summary = "Generate a QR code for a user supplied URL",
    description = "The response echoes the URL actually encoded as `formattedUrl`.",
    request_body = GenerateCustomQrRequest,
    responses(
        (status = 200, description = "QR code generated", body = GenerateQrResponse),
        (status = 400, description = "Missing or invalid URL", body = ApiErrorResponse),
        (status = 500, description = "QR encoding failed", body = ApiErrorResponse)
    )
)]
pub async fn generate_custom_qr(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateCustomQrRequest>,
) -> Result<Response<GenerateQrResponse>, ApiError> {
    let qr = state.service.generate_qr(&payload.custom_url)?;

    Ok(Response::OK(GenerateQrResponse::with_formatted_url(qr)))
}
