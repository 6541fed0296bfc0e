use crate::domain::common::{QrConfig, entities::app_errors::CoreError};

/// Port for the QR bitmap generator.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    /// Encode `content` as a QR symbol and return it as PNG bytes
    fn render_png(&self, content: &str, options: QrConfig) -> Result<Vec<u8>, CoreError>;
}
