use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider classification of an uploaded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Video,
    Raw,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Image, ResourceKind::Video, ResourceKind::Raw];

    /// Classifies a MIME type by its top-level prefix.
    pub fn from_mime(mime_type: &str) -> Self {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if mime_type.starts_with("image/") {
            ResourceKind::Image
        } else if mime_type.starts_with("video/") {
            ResourceKind::Video
        } else {
            ResourceKind::Raw
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Raw => "raw",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful upload, as reported by the storage provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadedAsset {
    pub original_name: String,
    pub resource_kind: ResourceKind,
    pub public_id: String,
    pub secure_url: String,
    pub format: Option<String>,
    pub size_bytes: Option<u64>,
}

/// A resource as listed by the storage provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredResource {
    pub public_id: String,
    pub secure_url: String,
    pub resource_kind: ResourceKind,
    pub format: Option<String>,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub public_id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub resource_kind: ResourceKind,
    pub format: Option<String>,
    pub size: String,
    pub created_at: DateTime<Utc>,
    pub thumbnail: Option<String>,
}

/// Listing of previously uploaded files.
///
/// Provider failures never fail the listing; they leave `files` empty and set
/// `error`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct FileListing {
    pub files: Vec<FileSummary>,
    pub error: Option<String>,
}

impl FileListing {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            files: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_from_mime() {
        assert_eq!(ResourceKind::from_mime("image/png"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_mime("IMAGE/JPEG"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_mime("video/mp4"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_mime("application/pdf"), ResourceKind::Raw);
        assert_eq!(ResourceKind::from_mime("text/plain"), ResourceKind::Raw);
    }

    #[test]
    fn test_resource_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ResourceKind::Video).unwrap();
        assert_eq!(json, "\"video\"");
    }
}
