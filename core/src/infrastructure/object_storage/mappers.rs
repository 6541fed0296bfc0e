use crate::domain::storage::entities::{ResourceKind, StoredResource, UploadedAsset};

use super::cloudinary::{CloudinaryResource, CloudinaryUploadResponse};

pub(crate) fn resource_kind(resource_type: &str) -> ResourceKind {
    match resource_type {
        "image" => ResourceKind::Image,
        "video" => ResourceKind::Video,
        _ => ResourceKind::Raw,
    }
}

impl From<CloudinaryResource> for StoredResource {
    fn from(resource: CloudinaryResource) -> Self {
        Self {
            resource_kind: resource_kind(&resource.resource_type),
            public_id: resource.public_id,
            secure_url: resource.secure_url,
            format: resource.format,
            size_bytes: resource.bytes,
            created_at: resource.created_at,
        }
    }
}

impl CloudinaryUploadResponse {
    pub(crate) fn into_asset(self, original_name: String) -> UploadedAsset {
        UploadedAsset {
            original_name,
            resource_kind: resource_kind(&self.resource_type),
            public_id: self.public_id,
            secure_url: self.secure_url,
            format: self.format,
            size_bytes: self.bytes,
        }
    }
}
