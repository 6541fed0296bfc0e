use std::io;
use std::path::Path;

use bytes::Bytes;
use tempfile::TempPath;

use super::entities::ResourceKind;

/// A spooled upload living in a temporary file.
///
/// The file is deleted when the value is dropped; [`SpooledFile::remove`]
/// deletes it eagerly and reports failures.
#[derive(Debug)]
pub struct SpooledFile {
    path: TempPath,
    size: u64,
}

impl SpooledFile {
    pub fn new(path: TempPath, size: u64) -> Self {
        Self { path, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn remove(self) -> io::Result<()> {
        self.path.close()
    }
}

#[derive(Debug)]
pub enum UploadPayload {
    Memory(Bytes),
    Spooled(SpooledFile),
}

impl UploadPayload {
    pub fn len(&self) -> u64 {
        match self {
            UploadPayload::Memory(bytes) => bytes.len() as u64,
            UploadPayload::Spooled(file) => file.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases local resources held by the payload.
    pub fn discard(self) -> io::Result<()> {
        match self {
            UploadPayload::Memory(_) => Ok(()),
            UploadPayload::Spooled(file) => file.remove(),
        }
    }
}

impl From<Bytes> for UploadPayload {
    fn from(bytes: Bytes) -> Self {
        UploadPayload::Memory(bytes)
    }
}

impl From<SpooledFile> for UploadPayload {
    fn from(file: SpooledFile) -> Self {
        UploadPayload::Spooled(file)
    }
}

#[derive(Debug)]
pub struct UploadFileInput {
    pub file_name: String,
    pub mime_type: String,
    pub payload: UploadPayload,
}

/// What the storage adapter needs to ingest one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUpload {
    pub public_id: String,
    pub resource_kind: ResourceKind,
    pub file_name: String,
    pub content_type: String,
}
