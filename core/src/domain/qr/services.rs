use tracing::{debug, error, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    data_uri,
    qr::{entities::QrCode, ports::QrRenderer, value_objects::NormalizedUrl},
    storage::ports::ObjectStoragePort,
};

const PNG_MEDIA_TYPE: &str = "image/png";

pub trait QrService: Send + Sync {
    /// Normalize and validate `url`, then render it as a PNG data URI.
    fn generate_qr(&self, url: &str) -> Result<QrCode, CoreError>;
}

impl<OS, QR> QrService for Service<OS, QR>
where
    OS: ObjectStoragePort,
    QR: QrRenderer,
{
    #[instrument(skip(self))]
    fn generate_qr(&self, url: &str) -> Result<QrCode, CoreError> {
        let url = NormalizedUrl::parse(url).map_err(|e| {
            warn!(error = %e, "Rejected URL for QR encoding");
            e
        })?;

        let png = self
            .qr_renderer
            .render_png(url.as_str(), self.config.qr)
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to render QR code");
                e
            })?;

        debug!(url = %url, png_size = png.len(), "QR code generated");

        Ok(QrCode {
            data_uri: data_uri::encode(PNG_MEDIA_TYPE, &png),
            png_size: png.len(),
            encoded_url: url.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::{
        qr::ports::MockQrRenderer,
        common::{CloudQrConfig, ObjectStorageConfig, QrConfig, UploadConfig},
        data_uri::DataUri,
        storage::{
            entities::{StoredResource, UploadedAsset},
            value_objects::{StorageUpload, UploadPayload},
        },
    };
    use crate::infrastructure::qr::QrCodeRenderer;

    struct UnusedStorage;

    impl ObjectStoragePort for UnusedStorage {
        fn is_configured(&self) -> bool {
            false
        }

        async fn upload(
            &self,
            _request: StorageUpload,
            _payload: &UploadPayload,
        ) -> Result<UploadedAsset, CoreError> {
            Err(CoreError::StorageNotConfigured)
        }

        async fn list_recent(&self, _max_results: usize) -> Result<Vec<StoredResource>, CoreError> {
            Err(CoreError::StorageNotConfigured)
        }

        fn thumbnail_url(&self, _public_id: &str, _size: u32) -> Option<String> {
            None
        }
    }

    fn config() -> CloudQrConfig {
        CloudQrConfig {
            object_storage: ObjectStorageConfig::default(),
            upload: UploadConfig::default(),
            qr: QrConfig::default(),
        }
    }

    #[test]
    fn test_bare_host_is_encoded_with_https() {
        let mut renderer = MockQrRenderer::new();
        renderer
            .expect_render_png()
            .with(eq("https://example.com"), eq(QrConfig::default()))
            .times(1)
            .returning(|_, _| Ok(vec![0x89, b'P', b'N', b'G']));

        let service = Service::new(UnusedStorage, renderer, config());
        let qr = service.generate_qr("example.com").unwrap();

        assert_eq!(qr.encoded_url, "https://example.com");
        assert_eq!(qr.data_uri, "data:image/png;base64,iVBORw==");
        assert_eq!(qr.png_size, 4);
    }

    #[test]
    fn test_invalid_url_is_never_rendered() {
        let mut renderer = MockQrRenderer::new();
        renderer.expect_render_png().never();

        let service = Service::new(UnusedStorage, renderer, config());

        assert!(matches!(
            service.generate_qr("not a url!!"),
            Err(CoreError::InvalidUrl(_))
        ));
        assert_eq!(service.generate_qr(""), Err(CoreError::MissingUrl));
    }

    #[test]
    fn test_renderer_failure_is_propagated() {
        let mut renderer = MockQrRenderer::new();
        renderer
            .expect_render_png()
            .returning(|_, _| Err(CoreError::QrEncodingError("data too long".to_string())));

        let service = Service::new(UnusedStorage, renderer, config());

        assert_eq!(
            service.generate_qr("https://example.com"),
            Err(CoreError::QrEncodingError("data too long".to_string()))
        );
    }

    #[test]
    fn test_data_uri_round_trip_matches_png_length() {
        let service = Service::new(UnusedStorage, QrCodeRenderer, config());
        let qr = service
            .generate_qr("https://res.cloudinary.com/demo/image/upload/sample.jpg")
            .unwrap();

        let decoded = DataUri::parse(&qr.data_uri).unwrap().decode().unwrap();
        assert_eq!(decoded.len(), qr.png_size);
        assert_eq!(&decoded[..8], b"\x89PNG\r\n\x1a\n");
    }
}
