use crate::domain::common::entities::app_errors::CoreError;

use super::entities::ResourceKind;

const ALLOWED_VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
    "video/ogg",
    "video/x-matroska",
];

const ALLOWED_DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
];

/// Size ceiling and MIME allow-list applied to every upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl UploadPolicy {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn check_size(&self, size: u64) -> Result<(), CoreError> {
        if size == 0 {
            return Err(CoreError::EmptyFile);
        }
        if size > self.max_bytes {
            return Err(CoreError::FileTooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    pub fn is_allowed(&self, mime_type: &str) -> bool {
        let essence = essence(mime_type);
        if essence.starts_with("image/") && essence.len() > "image/".len() {
            return true;
        }
        ALLOWED_VIDEO_TYPES.contains(&essence.as_str())
            || ALLOWED_DOCUMENT_TYPES.contains(&essence.as_str())
    }

    /// Validates size and type, returning the storage category on success.
    pub fn check(&self, size: u64, mime_type: &str) -> Result<ResourceKind, CoreError> {
        self.check_size(size)?;
        if !self.is_allowed(mime_type) {
            return Err(CoreError::UnsupportedMediaType(mime_type.to_string()));
        }
        Ok(ResourceKind::from_mime(&essence(mime_type)))
    }
}

/// Lowercased `type/subtype` without parameters.
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
