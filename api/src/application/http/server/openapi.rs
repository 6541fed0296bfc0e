use crate::application::http::{
    file::router::FileApiDoc, health::HealthApiDoc, page::router::PageApiDoc, qr::router::QrApiDoc,
    upload::router::UploadApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "CloudQR API",
    description = "Upload files to Cloudinary and share them as QR codes"
))]
pub struct ApiDoc;

/// The full document: every feature's paths mounted at the root.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(PageApiDoc::openapi());
    openapi.merge(UploadApiDoc::openapi());
    openapi.merge(QrApiDoc::openapi());
    openapi.merge(FileApiDoc::openapi());
    openapi.merge(HealthApiDoc::openapi());
    openapi
}
