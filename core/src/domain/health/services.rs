use crate::domain::{
    common::services::Service,
    health::{entities::HealthReport, ports::HealthCheckService},
    qr::ports::QrRenderer,
    storage::ports::ObjectStoragePort,
};

impl<OS, QR> HealthCheckService for Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    fn health(&self) -> HealthReport {
        let storage = &self.config.object_storage;

        HealthReport {
            provider: "cloudinary".to_string(),
            cloud_name_configured: storage
                .cloud_name
                .as_deref()
                .is_some_and(|name| !name.trim().is_empty()),
            credentials_configured: self.object_storage.is_configured(),
        }
    }
}
