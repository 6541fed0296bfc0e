use crate::{
    domain::common::{CloudQrConfig, services::Service},
    infrastructure::{object_storage::CloudinaryObjectStorage, qr::QrCodeRenderer},
};

pub type CloudQrService = Service<CloudinaryObjectStorage, QrCodeRenderer>;

/// Wires the production adapters into the application service.
pub async fn create_service(config: CloudQrConfig) -> Result<CloudQrService, anyhow::Error> {
    let object_storage = CloudinaryObjectStorage::new(config.object_storage.clone())?;

    tracing::info!(
        storage_configured = config.object_storage.is_configured(),
        upload_folder = %config.upload.folder,
        max_upload_bytes = config.upload.max_bytes,
        "Service created"
    );

    Ok(Service::new(object_storage, QrCodeRenderer, config))
}
