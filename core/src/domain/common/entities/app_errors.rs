use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No file was provided")]
    MissingFile,

    #[error("File cannot be empty")]
    EmptyFile,

    #[error("Incomplete file data")]
    IncompleteFileData,

    #[error("File too large. Max size is {limit} bytes")]
    FileTooLarge { limit: u64 },

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("No URL available")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Object storage is not configured")]
    StorageNotConfigured,

    #[error("{0}")]
    ObjectStorageError(String),

    #[error("Failed to generate QR code: {0}")]
    QrEncodingError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Whether the error was caused by the caller's input rather than by
    /// the server or an upstream provider.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::MissingFile
                | CoreError::EmptyFile
                | CoreError::IncompleteFileData
                | CoreError::FileTooLarge { .. }
                | CoreError::UnsupportedMediaType(_)
                | CoreError::MissingUrl
                | CoreError::InvalidUrl(_)
        )
    }
}
