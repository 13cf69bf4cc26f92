use std::path::PathBuf;

use thiserror::Error;

/// Failures of [`crate::storage::persist_base64_image`].
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Invalid base64 data: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Unable to detect image format from data")]
    UnknownFormat,

    #[error("Failed to save image to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// The payload itself is unusable, as opposed to a filesystem fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PersistError::Write { .. })
    }
}

/// Failures of one image-generation request, shared by both transports.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid API key")]
    Unauthorized,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Image generation failed: {0}")]
    Provider(#[source] anyhow::Error),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Internal error: {0}")]
    Internal(String),
}
