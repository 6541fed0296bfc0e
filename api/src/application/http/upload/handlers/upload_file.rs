use axum::{
    Extension,
    extract::{FromRequest, Multipart, Request, State},
    http::{
        HeaderMap, StatusCode,
        header::{ACCEPT, CONTENT_TYPE},
    },
    response::{IntoResponse, Response as AxumResponse},
};
use bytes::Bytes;
use cloudqr_core::domain::{
    common::entities::app_errors::CoreError,
    data_uri::DataUri,
    qr::services::QrService,
    storage::{entities::UploadedAsset, services::FileService, value_objects::UploadFileInput},
};
use tracing::{info, warn};

use crate::application::{
    client_middleware::ClientContext,
    http::{
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse, ValidateJson},
                response::Response,
            },
            app_state::AppState,
            templates::{INDEX_TEMPLATE, IndexPage},
        },
        upload::{
            spool::{multipart_error, spool_field},
            validators::{UploadDataUriRequest, UploadFileResponse, UploadedFileInfo},
        },
    },
};

#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    summary = "Upload a file to Cloudinary",
    description = "Accepts either a JSON body carrying the file as a data URI, or a multipart form with a `file` field. Multipart uploads are answered with the upload page unless the client accepts `application/json`.",
    request_body(content = UploadDataUriRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadFileResponse),
        (status = 400, description = "Missing or malformed file data", body = ApiErrorResponse),
        (status = 413, description = "File too large", body = ApiErrorResponse),
        (status = 415, description = "Unsupported file type", body = ApiErrorResponse),
        (status = 500, description = "Upload to the storage provider failed", body = ApiErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(client): Extension<ClientContext>,
    request: Request,
) -> Result<AxumResponse, ApiError> {
    if is_json(request.headers()) {
        let ValidateJson(body) =
            ValidateJson::<UploadDataUriRequest>::from_request(request, &state).await?;
        let input = data_uri_input(body)?;
        let (asset, size) = upload(&state, input).await?;

        return Ok(Response::OK(UploadFileResponse::new(&asset, size)).into_response());
    }

    let wants_json = accepts_json(request.headers());
    let multipart = Multipart::from_request(request, &state)
        .await
        .map_err(|rejection| {
            warn!(error = %rejection.body_text(), "Rejected upload body");
            ApiError::UnsupportedMediaType(
                "Expected multipart/form-data or application/json".to_string(),
            )
        })?;

    let result = match receive_multipart(&state, multipart).await {
        Ok(input) => upload(&state, input).await,
        Err(e) => Err(e),
    };

    if wants_json {
        let (asset, size) = result?;
        return Ok(Response::OK(UploadFileResponse::new(&asset, size)).into_response());
    }

    render_upload_page(&state, client, result)
}

async fn upload(state: &AppState, input: UploadFileInput) -> Result<(UploadedAsset, u64), ApiError> {
    let size = input.payload.len();
    let asset = state.service.upload_file(input).await?;
    info!(public_id = %asset.public_id, size, "Upload completed");
    Ok((asset, size))
}

async fn receive_multipart(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<UploadFileInput, ApiError> {
    let upload = &state.service.config().upload;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        // Browsers send an unnamed empty part when no file was picked.
        let file_name = match field.file_name() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => continue,
        };

        let mime_type = field
            .content_type()
            .filter(|content_type| !content_type.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| guess_mime_type(&file_name));

        let spooled = spool_field(field, &upload.spool_dir, upload.max_bytes).await?;

        return Ok(UploadFileInput {
            file_name,
            mime_type,
            payload: spooled.into(),
        });
    }

    Err(CoreError::MissingFile.into())
}

fn data_uri_input(body: UploadDataUriRequest) -> Result<UploadFileInput, ApiError> {
    let UploadDataUriRequest {
        file_data,
        file_name,
        file_type,
    } = body;

    let data_uri = DataUri::parse(&file_data).map_err(|e| {
        warn!(error = %e, "Rejected upload data URI");
        ApiError::BadRequest(e.to_string())
    })?;

    let bytes = data_uri.decode().map_err(|e| {
        warn!(error = %e, "Failed to decode upload data URI");
        ApiError::BadRequest(e.to_string())
    })?;

    let mime_type = file_type
        .filter(|file_type| !file_type.trim().is_empty())
        .or_else(|| data_uri.declared_media_type().map(str::to_string))
        .unwrap_or_else(|| guess_mime_type(&file_name));

    Ok(UploadFileInput {
        file_name,
        mime_type,
        payload: Bytes::from(bytes).into(),
    })
}

fn render_upload_page(
    state: &AppState,
    client: ClientContext,
    result: Result<(UploadedAsset, u64), ApiError>,
) -> Result<AxumResponse, ApiError> {
    let mut page = IndexPage::new(
        &state.args.server.root_path,
        client.is_mobile,
        state.service.upload_policy().max_bytes(),
    );

    let status = match result {
        Ok((asset, size)) => {
            page.qr_code = match state.service.generate_qr(&asset.secure_url) {
                Ok(qr) => Some(qr.data_uri),
                Err(e) => {
                    warn!(error = %e, url = %asset.secure_url, "Uploaded, but QR generation failed");
                    None
                }
            };
            page.uploaded_file = Some(UploadedFileInfo::from_asset(&asset, size));
            page.cloudinary_url = Some(asset.secure_url);
            StatusCode::OK
        }
        Err(e) => {
            let status = e.status();
            page.error = Some(e.to_string());
            status
        }
    };

    let html = state.templates.render(INDEX_TEMPLATE, &page)?;
    Ok((status, html).into_response())
}

fn guess_mime_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"))
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_input_resolves_mime_type() {
        let body = UploadDataUriRequest {
            file_data: "data:image/png;base64,aGVsbG8=".into(),
            file_name: "hello.bin".into(),
            file_type: None,
        };
        let input = data_uri_input(body).unwrap();
        assert_eq!(input.mime_type, "image/png");
        assert_eq!(input.payload.len(), 5);

        let body = UploadDataUriRequest {
            file_data: "data:;base64,aGVsbG8=".into(),
            file_name: "notes.txt".into(),
            file_type: Some("".into()),
        };
        assert_eq!(data_uri_input(body).unwrap().mime_type, "text/plain");

        let body = UploadDataUriRequest {
            file_data: "data:image/png;base64,aGVsbG8=".into(),
            file_name: "clip.mp4".into(),
            file_type: Some("video/mp4".into()),
        };
        assert_eq!(data_uri_input(body).unwrap().mime_type, "video/mp4");
    }

    #[test]
    fn test_data_uri_input_rejects_malformed_data() {
        let body = UploadDataUriRequest {
            file_data: "aGVsbG8=".into(),
            file_name: "hello.txt".into(),
            file_type: None,
        };
        assert!(matches!(data_uri_input(body), Err(ApiError::BadRequest(_))));

        let body = UploadDataUriRequest {
            file_data: "data:text/plain;base64,".into(),
            file_name: "hello.txt".into(),
            file_type: None,
        };
        assert!(matches!(data_uri_input(body), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_content_negotiation_headers() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        assert!(!accepts_json(&headers));

        headers.insert(CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        headers.insert(ACCEPT, "text/html, application/json;q=0.9".parse().unwrap());
        assert!(is_json(&headers));
        assert!(accepts_json(&headers));
    }
}
