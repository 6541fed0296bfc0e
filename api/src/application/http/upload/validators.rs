use cloudqr_core::domain::{
    common::format_kilobytes,
    storage::entities::{ResourceKind, UploadedAsset},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Upload of a file already encoded as a `data:` URI.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadDataUriRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Incomplete file data"))]
    pub file_data: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Incomplete file data"))]
    pub file_name: String,

    pub file_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_kind: ResourceKind,
    pub public_id: String,
    pub format: Option<String>,
    pub size: String,
}

impl UploadedFileInfo {
    /// `fallback_size` is used when the provider does not report a size.
    pub fn from_asset(asset: &UploadedAsset, fallback_size: u64) -> Self {
        Self {
            name: asset.original_name.clone(),
            resource_kind: asset.resource_kind,
            public_id: asset.public_id.clone(),
            format: asset.format.clone(),
            size: format_kilobytes(asset.size_bytes.unwrap_or(fallback_size)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    pub success: bool,
    pub cloudinary_url: String,
    pub uploaded_file: UploadedFileInfo,
}

impl UploadFileResponse {
    pub fn new(asset: &UploadedAsset, fallback_size: u64) -> Self {
        Self {
            success: true,
            cloudinary_url: asset.secure_url.clone(),
            uploaded_file: UploadedFileInfo::from_asset(asset, fallback_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_shape() {
        let asset = UploadedAsset {
            original_name: "cat.png".into(),
            resource_kind: ResourceKind::Image,
            public_id: "qr-generator/1-cat_png".into(),
            secure_url: "https://res.cloudinary.com/demo/image/upload/qr-generator/1-cat_png.png"
                .into(),
            format: Some("png".into()),
            size_bytes: None,
        };

        let json = serde_json::to_value(UploadFileResponse::new(&asset, 2048)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "cloudinaryUrl": "https://res.cloudinary.com/demo/image/upload/qr-generator/1-cat_png.png",
                "uploadedFile": {
                    "name": "cat.png",
                    "type": "image",
                    "publicId": "qr-generator/1-cat_png",
                    "format": "png",
                    "size": "2.00 KB"
                }
            })
        );
    }
}
