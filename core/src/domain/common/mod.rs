use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

pub mod entities;
pub mod services;

/// 50 MiB, the largest payload accepted for upload.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct CloudQrConfig {
    pub object_storage: ObjectStorageConfig,
    pub upload: UploadConfig,
    pub qr: QrConfig,
}

#[derive(Clone, Debug)]
pub struct ObjectStorageConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_base_url: String,
    pub delivery_base_url: String,
    pub request_timeout: Duration,
}

impl ObjectStorageConfig {
    pub fn is_configured(&self) -> bool {
        [&self.cloud_name, &self.api_key, &self.api_secret]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            api_base_url: "https://api.cloudinary.com".to_string(),
            delivery_base_url: "https://res.cloudinary.com".to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_bytes: u64,
    pub folder: String,
    pub spool_dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            folder: "qr-generator".to_string(),
            spool_dir: std::env::temp_dir(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrConfig {
    /// Edge length of one QR module, in pixels.
    pub module_size: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            margin: 2,
        }
    }
}

pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Replaces every character that is not an ASCII letter or digit with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Human readable size, e.g. `"12.50 KB"`.
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
