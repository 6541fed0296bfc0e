use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::{StoredResource, UploadedAsset};
use super::value_objects::{StorageUpload, UploadPayload};

/// Port for the cloud object storage provider.
pub trait ObjectStoragePort: Send + Sync {
    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Send an object to the provider's ingestion API
    fn upload(
        &self,
        request: StorageUpload,
        payload: &UploadPayload,
    ) -> impl Future<Output = Result<UploadedAsset, CoreError>> + Send;

    /// Most recently created resources, newest first
    fn list_recent(
        &self,
        max_results: usize,
    ) -> impl Future<Output = Result<Vec<StoredResource>, CoreError>> + Send;

    /// Delivery URL of a square, cropped thumbnail for an image resource
    fn thumbnail_url(&self, public_id: &str, size: u32) -> Option<String>;
}
