use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A rendered QR code, packaged for inline display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QrCode {
    /// `data:image/png;base64,...`
    pub data_uri: String,
    /// The URL actually encoded, after normalization.
    pub encoded_url: String,
    pub png_size: usize,
}

/// Where the encoded URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QrSource {
    Cloudinary,
    Custom,
}
