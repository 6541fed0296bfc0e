use cloudqr_core::domain::qr::entities::{QrCode, QrSource};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_DOWNLOAD_NAME: &str = "qrcode.png";
const QR_GENERATED_MESSAGE: &str = "QR code generated successfully";

#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrRequest {
    pub cloudinary_url: Option<String>,
    pub custom_url: Option<String>,
}

impl GenerateQrRequest {
    /// The URL to encode; an uploaded file's URL wins over a custom one.
    pub fn target(&self) -> Option<(&str, QrSource)> {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .filter(|url| !url.trim().is_empty())
        }

        non_empty(&self.cloudinary_url)
            .map(|url| (url, QrSource::Cloudinary))
            .or_else(|| non_empty(&self.custom_url).map(|url| (url, QrSource::Custom)))
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCustomQrRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter a URL"))]
    pub custom_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrResponse {
    pub success: bool,
    /// PNG image as a `data:image/png;base64,...` URI
    pub qr_code: String,
    pub message: String,
    pub source: QrSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_url: Option<String>,
}

impl GenerateQrResponse {
    pub fn new(qr: QrCode, source: QrSource) -> Self {
        Self {
            success: true,
            qr_code: qr.data_uri,
            message: QR_GENERATED_MESSAGE.to_string(),
            source,
            formatted_url: None,
        }
    }

    pub fn with_formatted_url(qr: QrCode) -> Self {
        let formatted_url = qr.encoded_url.clone();
        Self {
            formatted_url: Some(formatted_url),
            ..Self::new(qr, QrSource::Custom)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DownloadQrQuery {
    /// `data:` URI of the image to download
    pub data_uri: Option<String>,
    /// Attachment file name, `qrcode.png` by default
    pub filename: Option<String>,
}

/// Makes `name` safe to embed in a quoted `Content-Disposition` filename.
pub fn sanitize_download_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_DOWNLOAD_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_prefers_cloudinary_url() {
        let request = GenerateQrRequest {
            cloudinary_url: Some("https://res.cloudinary.com/demo/a.png".into()),
            custom_url: Some("example.com".into()),
        };
        assert_eq!(
            request.target(),
            Some(("https://res.cloudinary.com/demo/a.png", QrSource::Cloudinary))
        );

        let request = GenerateQrRequest {
            cloudinary_url: Some("  ".into()),
            custom_url: Some("example.com".into()),
        };
        assert_eq!(request.target(), Some(("example.com", QrSource::Custom)));

        assert_eq!(GenerateQrRequest::default().target(), None);
    }

    #[test]
    fn test_sanitize_download_name() {
        assert_eq!(sanitize_download_name("qr-123.png"), "qr-123.png");
        assert_eq!(sanitize_download_name("a\"b\\c\r\n.png"), "abc.png");
        assert_eq!(sanitize_download_name(" \"\" "), DEFAULT_DOWNLOAD_NAME);
    }

    #[test]
    fn test_custom_response_carries_formatted_url() {
        let qr = QrCode {
            data_uri: "data:image/png;base64,AAAA".into(),
            encoded_url: "https://example.com".into(),
            png_size: 3,
        };

        let json = serde_json::to_value(GenerateQrResponse::with_formatted_url(qr.clone())).unwrap();
        assert_eq!(json["source"], "custom");
        assert_eq!(json["formattedUrl"], "https://example.com");

        let json = serde_json::to_value(GenerateQrResponse::new(qr, QrSource::Cloudinary)).unwrap();
        assert_eq!(json["source"], "cloudinary");
        assert!(json.get("formattedUrl").is_none());
    }
}
