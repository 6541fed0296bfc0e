use chrono::{DateTime, Utc};
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    storage::{
        entities::{ResourceKind, StoredResource, UploadedAsset},
        ports::ObjectStoragePort,
        value_objects::{StorageUpload, UploadPayload},
    },
};

#[derive(Debug, Clone)]
struct CloudinaryCredentials {
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryCredentials {
    fn from_config(config: &ObjectStorageConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }

        Some(Self {
            cloud_name: config.cloud_name.clone()?.trim().to_string(),
            api_key: config.api_key.clone()?.trim().to_string(),
            api_secret: config.api_secret.clone()?.trim().to_string(),
        })
    }
}

/// Cloudinary upload and admin API client.
#[derive(Clone)]
pub struct CloudinaryObjectStorage {
    client: Client,
    credentials: Option<CloudinaryCredentials>,
    cloud_name: Option<String>,
    api_base_url: String,
    delivery_base_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudinaryUploadResponse {
    pub public_id: String,
    pub secure_url: String,
    pub resource_type: String,
    pub format: Option<String>,
    pub bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CloudinaryResourcesResponse {
    #[serde(default)]
    resources: Vec<CloudinaryResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudinaryResource {
    pub public_id: String,
    pub secure_url: String,
    pub resource_type: String,
    pub format: Option<String>,
    #[serde(default)]
    pub bytes: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorEnvelope {
    error: CloudinaryErrorBody,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    message: String,
}

impl CloudinaryObjectStorage {
    pub fn new(config: ObjectStorageConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to build HTTP client");
                CoreError::ObjectStorageError(format!("Failed to build HTTP client: {}", e))
            })?;

        let credentials = CloudinaryCredentials::from_config(&config);

        tracing::info!(
            cloud_name = ?config.cloud_name,
            api_base_url = %config.api_base_url,
            configured = credentials.is_some(),
            "Initializing Cloudinary client"
        );

        Ok(Self {
            client,
            credentials,
            cloud_name: config
                .cloud_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            delivery_base_url: config.delivery_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn credentials(&self) -> Result<&CloudinaryCredentials, CoreError> {
        self.credentials.as_ref().ok_or_else(|| {
            tracing::warn!("Cloudinary credentials are missing");
            CoreError::StorageNotConfigured
        })
    }

    async fn list_kind(
        &self,
        credentials: &CloudinaryCredentials,
        kind: ResourceKind,
        max_results: usize,
    ) -> Result<Vec<StoredResource>, CoreError> {
        let url = format!(
            "{}/v1_1/{}/resources/{}/upload",
            self.api_base_url, credentials.cloud_name, kind
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&credentials.api_key, Some(&credentials.api_secret))
            .query(&[
                ("max_results", max_results.to_string()),
                ("direction", "desc".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, resource_kind = %kind, "Cloudinary list request failed");
                CoreError::ObjectStorageError(format!("Failed to list resources: {}", e))
            })?;

        let response = ensure_success(response).await?;

        let body: CloudinaryResourcesResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Cloudinary resources response");
            CoreError::ObjectStorageError(format!("Failed to parse provider response: {}", e))
        })?;

        Ok(body
            .resources
            .into_iter()
            .map(StoredResource::from)
            .collect())
    }
}

impl ObjectStoragePort for CloudinaryObjectStorage {
    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    #[instrument(skip(self, payload), fields(public_id = %request.public_id))]
    async fn upload(
        &self,
        request: StorageUpload,
        payload: &UploadPayload,
    ) -> Result<UploadedAsset, CoreError> {
        let credentials = self.credentials()?;
        let timestamp = Utc::now().timestamp().to_string();

        let signed_params = [
            ("overwrite", "false".to_string()),
            ("public_id", request.public_id.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = sign(&signed_params, &credentials.api_secret);

        let part = match payload {
            UploadPayload::Memory(bytes) => {
                Part::stream_with_length(bytes.clone(), bytes.len() as u64)
            }
            UploadPayload::Spooled(file) => {
                let handle = tokio::fs::File::open(file.path()).await.map_err(|e| {
                    tracing::error!(error = %e, path = %file.path().display(), "Failed to open spooled upload");
                    CoreError::InternalServerError
                })?;
                Part::stream_with_length(handle, file.size())
            }
        };

        let part = part
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .map_err(|_| CoreError::UnsupportedMediaType(request.content_type.clone()))?;

        let form = signed_params
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .text("api_key", credentials.api_key.clone())
            .text("signature", signature)
            .part("file", part);

        let url = format!(
            "{}/v1_1/{}/{}/upload",
            self.api_base_url, credentials.cloud_name, request.resource_kind
        );

        tracing::info!(
            resource_kind = %request.resource_kind,
            size = payload.len(),
            content_type = %request.content_type,
            "Uploading object to Cloudinary"
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "request timeout"
                } else if e.is_connect() {
                    "connection error"
                } else {
                    "transport error"
                };
                tracing::error!(error = %e, error_kind, "Cloudinary upload request failed");
                CoreError::ObjectStorageError(format!("Error: {} ({})", e, error_kind))
            })?;

        let response = ensure_success(response).await?;

        let body: CloudinaryUploadResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Cloudinary upload response");
            CoreError::ObjectStorageError(format!("Failed to parse provider response: {}", e))
        })?;

        tracing::info!(
            public_id = %body.public_id,
            secure_url = %body.secure_url,
            "Object uploaded successfully"
        );

        Ok(body.into_asset(request.file_name))
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, max_results: usize) -> Result<Vec<StoredResource>, CoreError> {
        let credentials = self.credentials()?;

        let (images, videos, raws) = tokio::try_join!(
            self.list_kind(credentials, ResourceKind::Image, max_results),
            self.list_kind(credentials, ResourceKind::Video, max_results),
            self.list_kind(credentials, ResourceKind::Raw, max_results),
        )?;

        let mut resources = images
            .into_iter()
            .chain(videos)
            .chain(raws)
            .collect::<Vec<StoredResource>>();
        resources.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        resources.truncate(max_results);

        Ok(resources)
    }

    fn thumbnail_url(&self, public_id: &str, size: u32) -> Option<String> {
        let cloud_name = self.cloud_name.as_ref()?;
        Some(format!(
            "{}/{}/image/upload/c_fill,h_{size},w_{size}/{}",
            self.delivery_base_url, cloud_name, public_id
        ))
    }
}

/// Cloudinary request signature: the sorted `key=value` pairs joined with
/// `&`, followed by the API secret, hashed with SHA-1.
pub(crate) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut pairs = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let to_sign = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Turns a provider error message into the one shown to users.
pub(crate) fn describe_provider_error(message: &str) -> String {
    if message.contains("File size too large") {
        "The file is too large".to_string()
    } else if message.contains("Invalid image file") {
        "Invalid image file".to_string()
    } else if message.contains("format") {
        "Unsupported file format".to_string()
    } else {
        format!("Error: {}", message)
    }
}

async fn ensure_success(response: Response) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<CloudinaryErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("provider returned {}", status));

    tracing::error!(status = %status, message = %message, "Cloudinary API error");

    Err(CoreError::ObjectStorageError(describe_provider_error(
        &message,
    )))
}
