use std::sync::Arc;

use crate::domain::{
    common::CloudQrConfig, qr::ports::QrRenderer, storage::policies::UploadPolicy,
    storage::ports::ObjectStoragePort,
};

/// Application service shared by every request handler.
///
/// Adapters are held behind `Arc` so the service is cheap to clone into
/// handler state.
pub struct Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    pub(crate) object_storage: Arc<OS>,
    pub(crate) qr_renderer: Arc<QR>,
    pub(crate) upload_policy: UploadPolicy,
    pub(crate) config: CloudQrConfig,
}

impl<OS, QR> Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    pub fn new(object_storage: OS, qr_renderer: QR, config: CloudQrConfig) -> Self {
        Self {
            object_storage: Arc::new(object_storage),
            qr_renderer: Arc::new(qr_renderer),
            upload_policy: UploadPolicy::new(config.upload.max_bytes),
            config,
        }
    }

    pub fn config(&self) -> &CloudQrConfig {
        &self.config
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.upload_policy
    }
}

impl<OS, QR> Clone for Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    fn clone(&self) -> Self {
        Self {
            object_storage: Arc::clone(&self.object_storage),
            qr_renderer: Arc::clone(&self.qr_renderer),
            upload_policy: self.upload_policy.clone(),
            config: self.config.clone(),
        }
    }
}
