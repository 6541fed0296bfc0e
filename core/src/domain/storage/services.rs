use std::future::Future;

use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::{
        entities::app_errors::CoreError, format_kilobytes, sanitize_file_name,
        services::Service, unix_millis,
    },
    qr::ports::QrRenderer,
    storage::{
        entities::{FileListing, FileSummary, ResourceKind, StoredResource, UploadedAsset},
        ports::ObjectStoragePort,
        value_objects::{StorageUpload, UploadFileInput, UploadPayload},
    },
};

pub const MAX_LISTED_FILES: usize = 50;
pub const THUMBNAIL_SIZE: u32 = 100;

/// Service trait for file storage operations
pub trait FileService: Send + Sync {
    /// Validate a payload and forward it to the storage provider.
    ///
    /// Any temporary file backing the payload is removed before returning,
    /// whatever the outcome.
    fn upload_file(
        &self,
        input: UploadFileInput,
    ) -> impl Future<Output = Result<UploadedAsset, CoreError>> + Send;

    /// List the most recently uploaded files. Provider failures are reported
    /// through [`FileListing::error`].
    fn list_files(&self) -> impl Future<Output = FileListing> + Send;
}

impl<OS, QR> FileService for Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    #[instrument(
        skip(self, input),
        fields(file_name = %input.file_name, mime_type = %input.mime_type, size = input.payload.len())
    )]
    async fn upload_file(&self, input: UploadFileInput) -> Result<UploadedAsset, CoreError> {
        let UploadFileInput {
            file_name,
            mime_type,
            payload,
        } = input;

        let result = self.forward_upload(&file_name, &mime_type, &payload).await;

        if let Err(e) = payload.discard() {
            warn!(error = %e, "Failed to remove temporary upload file");
        }

        result
    }

    #[instrument(skip(self))]
    async fn list_files(&self) -> FileListing {
        match self.object_storage.list_recent(MAX_LISTED_FILES).await {
            Ok(resources) => {
                let files = resources
                    .into_iter()
                    .take(MAX_LISTED_FILES)
                    .map(|resource| self.summarize(resource))
                    .collect::<Vec<FileSummary>>();

                tracing::debug!(count = files.len(), "Listed files");

                FileListing { files, error: None }
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch files from object storage");
                FileListing::failed("Failed to load files")
            }
        }
    }
}

impl<OS, QR> Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    async fn forward_upload(
        &self,
        file_name: &str,
        mime_type: &str,
        payload: &UploadPayload,
    ) -> Result<UploadedAsset, CoreError> {
        let size = payload.len();

        let resource_kind = self.upload_policy.check(size, mime_type).map_err(|e| {
            warn!(error = %e, size, "Upload rejected");
            e
        })?;

        let request = StorageUpload {
            public_id: self.build_public_id(file_name),
            resource_kind,
            file_name: file_name.to_string(),
            content_type: mime_type.to_string(),
        };

        info!(
            public_id = %request.public_id,
            resource_kind = %resource_kind,
            size,
            "Uploading file to object storage"
        );

        let asset = self.object_storage.upload(request, payload).await?;

        info!(
            public_id = %asset.public_id,
            url = %asset.secure_url,
            "File uploaded successfully"
        );

        Ok(asset)
    }

    fn build_public_id(&self, file_name: &str) -> String {
        let name = format!("{}-{}", unix_millis(), sanitize_file_name(file_name));
        let folder = self.config.upload.folder.trim_matches('/');
        if folder.is_empty() {
            name
        } else {
            format!("{folder}/{name}")
        }
    }

    fn summarize(&self, resource: StoredResource) -> FileSummary {
        let thumbnail = match resource.resource_kind {
            ResourceKind::Image => self
                .object_storage
                .thumbnail_url(&resource.public_id, THUMBNAIL_SIZE),
            _ => None,
        };

        FileSummary {
            public_id: resource.public_id,
            url: resource.secure_url,
            resource_kind: resource.resource_kind,
            format: resource.format,
            size: format_kilobytes(resource.size_bytes),
            created_at: resource.created_at,
            thumbnail,
        }
    }
}
