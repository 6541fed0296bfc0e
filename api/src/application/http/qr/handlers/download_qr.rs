use axum::{
    extract::Query,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response as AxumResponse},
};
use cloudqr_core::domain::data_uri::DataUri;
use tracing::{debug, error};

use crate::application::http::{
    qr::validators::{DEFAULT_DOWNLOAD_NAME, DownloadQrQuery, sanitize_download_name},
    server::api_entities::api_error::{ApiError, ApiErrorResponse},
};

#[utoipa::path(
    get,
    path = "/download-qr",
    tag = "qr",
    summary = "Download a data URI as a file attachment",
    params(DownloadQrQuery),
    responses(
        (status = 200, description = "Decoded file", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "No data URI given", body = ApiErrorResponse),
        (status = 500, description = "Malformed data URI", body = ApiErrorResponse)
    )
)]
pub async fn download_qr(Query(query): Query<DownloadQrQuery>) -> Result<AxumResponse, ApiError> {
    let data_uri = query
        .data_uri
        .filter(|data_uri| !data_uri.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No QR code to download".to_string()))?;

    let bytes = DataUri::parse(&data_uri)
        .and_then(|uri| uri.decode())
        .map_err(|e| {
            error!(error = %e, "Failed to decode QR code for download");
            ApiError::InternalServerError(format!("Failed to download QR code: {e}"))
        })?;

    let filename =
        sanitize_download_name(query.filename.as_deref().unwrap_or(DEFAULT_DOWNLOAD_NAME));

    debug!(%filename, size = bytes.len(), "Serving QR code download");

    Ok((
        [
            (CONTENT_TYPE, "image/png".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
