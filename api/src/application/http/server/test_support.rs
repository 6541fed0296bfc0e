use std::{
    path::{Path as FsPath, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_test::TestServer;
use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::{net::TcpListener, task::JoinHandle};

use super::http_server::{routes, state};
use crate::args::Args;

pub const CLOUD_NAME: &str = "demo";

/// What the fake provider saw for one upload request.
#[derive(Debug, Clone, Default)]
pub struct ReceivedUpload {
    pub resource_kind: String,
    pub public_id: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    pub signature: Option<String>,
    /// Entries in the spool directory while the provider was receiving.
    pub spooled_files: usize,
}

#[derive(Clone)]
struct ProviderState {
    uploads: Arc<Mutex<Vec<ReceivedUpload>>>,
    fail_uploads: Arc<AtomicBool>,
    fail_listing: Arc<AtomicBool>,
    spool_dir: PathBuf,
}

/// The app wired to an in-process fake of the Cloudinary API.
pub struct CloudQrContext {
    pub server: TestServer,
    pub spool_dir: TempDir,
    provider: ProviderState,
    provider_task: JoinHandle<()>,
}

impl CloudQrContext {
    pub async fn with_args(extra: &[&str]) -> Self {
        let spool_dir = TempDir::new().unwrap();
        let provider = ProviderState {
            uploads: Arc::default(),
            fail_uploads: Arc::default(),
            fail_listing: Arc::default(),
            spool_dir: spool_dir.path().to_path_buf(),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let app = fake_cloudinary(provider.clone());
        let provider_task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let spool_path = spool_dir.path().to_string_lossy().to_string();
        let mut argv = vec![
            "cloudqr",
            "--cloud-name",
            CLOUD_NAME,
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "--api-base-url",
            base_url.as_str(),
            "--spool-dir",
            spool_path.as_str(),
        ];
        argv.extend_from_slice(extra);

        let server = test_server(&argv).await;

        Self {
            server,
            spool_dir,
            provider,
            provider_task,
        }
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.provider.uploads.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self) {
        self.provider.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_listing(&self) {
        self.provider.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn spooled_files(&self) -> usize {
        count_entries(self.spool_dir.path())
    }
}

impl AsyncTestContext for CloudQrContext {
    async fn setup() -> Self {
        Self::with_args(&[]).await
    }

    async fn teardown(self) {
        self.provider_task.abort();
    }
}

/// Builds the application routes from command line style arguments.
pub async fn test_server(argv: &[&str]) -> TestServer {
    let args = Arc::new(Args::try_parse_from(argv).unwrap());
    let state = state(args).await.unwrap();
    TestServer::new(routes(state)).unwrap()
}

fn count_entries(dir: &FsPath) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

fn fake_cloudinary(provider: ProviderState) -> Router {
    Router::new()
        .route("/v1_1/{cloud}/{kind}/upload", post(fake_upload))
        .route("/v1_1/{cloud}/resources/{kind}/upload", get(fake_resources))
        .with_state(provider)
}

fn delivery_url(cloud: &str, kind: &str, public_id: &str) -> String {
    format!("https://res.cloudinary.com/{cloud}/{kind}/upload/{public_id}")
}

fn extension(file_name: Option<&str>) -> Option<String> {
    file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

async fn fake_upload(
    State(provider): State<ProviderState>,
    Path((cloud, kind)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Response {
    let mut received = ReceivedUpload {
        resource_kind: kind.clone(),
        spooled_files: count_entries(&provider.spool_dir),
        ..ReceivedUpload::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "public_id" => received.public_id = field.text().await.unwrap_or_default(),
            "signature" => received.signature = field.text().await.ok(),
            "file" => {
                received.file_name = field.file_name().map(str::to_string);
                received.content_type = field.content_type().map(str::to_string);
                received.size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            }
            _ => {}
        }
    }

    provider.uploads.lock().unwrap().push(received.clone());

    if provider.fail_uploads.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "message": "File size too large. Got 10. Maximum is 5." } })),
        )
            .into_response();
    }

    Json(json!({
        "public_id": received.public_id,
        "secure_url": delivery_url(&cloud, &kind, &received.public_id),
        "resource_type": kind,
        "format": extension(received.file_name.as_deref()),
        "bytes": received.size,
    }))
    .into_response()
}

async fn fake_resources(
    State(provider): State<ProviderState>,
    Path((cloud, kind)): Path<(String, String)>,
) -> Response {
    if provider.fail_listing.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "Invalid api_key key" } })),
        )
            .into_response();
    }

    let resources = provider
        .uploads
        .lock()
        .unwrap()
        .iter()
        .enumerate()
        .filter(|(_, upload)| upload.resource_kind == kind)
        .map(|(index, upload)| {
            json!({
                "public_id": upload.public_id,
                "secure_url": delivery_url(&cloud, &kind, &upload.public_id),
                "resource_type": kind,
                "format": extension(upload.file_name.as_deref()),
                "bytes": upload.size,
                "created_at": format!("2024-05-01T12:00:{:02}Z", index % 60),
            })
        })
        .collect::<Vec<Value>>();

    Json(json!({ "resources": resources })).into_response()
}
