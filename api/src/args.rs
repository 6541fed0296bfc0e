use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use cloudqr_core::domain::common::{
    CloudQrConfig, DEFAULT_MAX_UPLOAD_BYTES, ObjectStorageConfig, QrConfig, UploadConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "cloudqr", version, about = "Upload files to Cloudinary and share them as QR codes")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub upload: UploadArgs,

    #[command(flatten)]
    pub qr: QrArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/qr`
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StorageArgs {
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloud_name: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_KEY")]
    pub api_key: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    #[arg(
        long,
        env = "CLOUDINARY_API_BASE_URL",
        default_value = "https://api.cloudinary.com"
    )]
    pub api_base_url: String,

    #[arg(
        long,
        env = "CLOUDINARY_DELIVERY_BASE_URL",
        default_value = "https://res.cloudinary.com"
    )]
    pub delivery_base_url: String,

    #[arg(long, env = "STORAGE_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UploadArgs {
    #[arg(long, env = "UPLOAD_FOLDER", default_value = "qr-generator")]
    pub upload_folder: String,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: u64,

    /// Directory for multipart uploads in flight (defaults to the system temp dir)
    #[arg(long, env = "SPOOL_DIR")]
    pub spool_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct QrArgs {
    /// Pixels per QR module
    #[arg(long, env = "QR_MODULE_SIZE", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub qr_module_size: u32,

    /// Quiet zone around the QR symbol, in modules
    #[arg(long, env = "QR_MARGIN", default_value_t = 2, value_parser = clap::value_parser!(u32).range(0..=16))]
    pub qr_margin: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    #[arg(long, env = "LOG_FILTER", default_value = "info,tower_http=debug")]
    pub log_filter: String,
}

impl From<Args> for CloudQrConfig {
    fn from(args: Args) -> Self {
        Self {
            object_storage: ObjectStorageConfig {
                cloud_name: args.storage.cloud_name,
                api_key: args.storage.api_key,
                api_secret: args.storage.api_secret,
                api_base_url: args.storage.api_base_url,
                delivery_base_url: args.storage.delivery_base_url,
                request_timeout: Duration::from_secs(args.storage.request_timeout_secs),
            },
            upload: UploadConfig {
                max_bytes: args.upload.max_upload_bytes,
                folder: args.upload.upload_folder,
                spool_dir: args.upload.spool_dir.unwrap_or_else(std::env::temp_dir),
            },
            qr: QrConfig {
                module_size: args.qr.qr_module_size,
                margin: args.qr.qr_margin,
            },
        }
    }
}
