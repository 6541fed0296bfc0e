use axum::response::Html;
use cloudqr_core::domain::storage::entities::FileSummary;
use minijinja::Environment;
use serde::Serialize;
use tracing::error;

use super::api_entities::api_error::ApiError;
use crate::application::http::upload::validators::UploadedFileInfo;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const FILES_TEMPLATE: &str = "files.html";

const INDEX_TITLE: &str = "Cloudinary QR Generator";
const FILES_TITLE: &str = "Uploaded files";

/// HTML pages, compiled into the binary.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../../../../templates/layout.html"))?;
        env.add_template(INDEX_TEMPLATE, include_str!("../../../../templates/index.html"))?;
        env.add_template(FILES_TEMPLATE, include_str!("../../../../templates/files.html"))?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<Html<String>, ApiError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map(Html)
            .map_err(|e| {
                error!(error = %e, template = name, "Failed to render template");
                ApiError::internal()
            })
    }
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub title: &'static str,
    pub root_path: String,
    pub is_mobile: bool,
    pub max_upload_mb: u64,
    pub cloudinary_url: Option<String>,
    pub uploaded_file: Option<UploadedFileInfo>,
    pub qr_code: Option<String>,
    pub error: Option<String>,
}

impl IndexPage {
    pub fn new(root_path: &str, is_mobile: bool, max_upload_bytes: u64) -> Self {
        Self {
            title: INDEX_TITLE,
            root_path: root_path.to_string(),
            is_mobile,
            max_upload_mb: max_upload_bytes / (1024 * 1024),
            cloudinary_url: None,
            uploaded_file: None,
            qr_code: None,
            error: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilesPage {
    pub title: &'static str,
    pub root_path: String,
    pub is_mobile: bool,
    pub files: Vec<FileSummary>,
    pub error: Option<String>,
}

impl FilesPage {
    pub fn new(root_path: &str, is_mobile: bool, files: Vec<FileSummary>, error: Option<String>) -> Self {
        Self {
            title: FILES_TITLE,
            root_path: root_path.to_string(),
            is_mobile,
            files,
            error,
        }
    }
}
