use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use cloudqr_core::domain::{
    common::entities::app_errors::CoreError, storage::value_objects::SpooledFile,
};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

use crate::application::http::server::api_entities::api_error::ApiError;

const SPOOL_PREFIX: &str = "cloudqr-upload-";

/// Streams a multipart field into a temporary file under `dir`.
///
/// Aborts with [`CoreError::FileTooLarge`] as soon as more than `max_bytes`
/// have been received; the partial file is removed on every error path.
pub async fn spool_field(
    mut field: Field<'_>,
    dir: &Path,
    max_bytes: u64,
) -> Result<SpooledFile, ApiError> {
    let (file, path) = tempfile::Builder::new()
        .prefix(SPOOL_PREFIX)
        .tempfile_in(dir)
        .map_err(|e| {
            error!(error = %e, dir = %dir.display(), "Failed to create spool file");
            ApiError::internal()
        })?
        .into_parts();

    let mut file = tokio::fs::File::from_std(file);
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size += chunk.len() as u64;
        if size > max_bytes {
            warn!(size, max_bytes, "Upload exceeded size limit while spooling");
            return Err(CoreError::FileTooLarge { limit: max_bytes }.into());
        }

        file.write_all(&chunk).await.map_err(|e| {
            error!(error = %e, "Failed to write spool file");
            ApiError::internal()
        })?;
    }

    file.flush().await.map_err(|e| {
        error!(error = %e, "Failed to flush spool file");
        ApiError::internal()
    })?;

    debug!(size, path = %path.display(), "Upload spooled to disk");

    Ok(SpooledFile::new(path, size))
}

pub fn multipart_error(error: MultipartError) -> ApiError {
    warn!(error = %error, "Failed to read multipart body");
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(error.body_text())
    } else {
        ApiError::BadRequest(error.body_text())
    }
}
