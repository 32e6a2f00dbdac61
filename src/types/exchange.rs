use serde::{Deserialize, Serialize};

use crate::catalog::payload::PayloadError;
use crate::catalog::validate::ItemError;
use crate::storage::backup::BackupOutcome;
use crate::storage::persist::PersistError;
use crate::types::identifiers::Fingerprint;

/// A write request as handed over by the transport layer.
/// Method and authentication checks have already happened upstream.
#[derive(Debug, Clone, Default)]
pub struct SaveRequest {
    /// Raw `If-Match` header value, if the caller sent one.
    pub if_match: Option<String>,
    pub body: Vec<u8>,
}

impl SaveRequest {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            if_match: None,
            body: body.into(),
        }
    }

    pub fn with_if_match(mut self, token: impl Into<String>) -> Self {
        self.if_match = Some(token.into());
        self
    }
}

/// Success body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub ok: bool,
    pub etag: String,
}

/// Result of an accepted write.
///
/// A skipped backup does not fail the write; it is carried here as a warning.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub etag: Fingerprint,
    pub product_count: usize,
    pub backup: BackupOutcome,
}

impl SaveOutcome {
    pub fn has_warnings(&self) -> bool {
        matches!(self.backup, BackupOutcome::Skipped { .. })
    }

    pub fn response_body(&self) -> SaveResponse {
        SaveResponse {
            ok: true,
            etag: self.etag.as_str().to_string(),
        }
    }
}

/// The current document as seen by a reader.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub bytes: Vec<u8>,
    pub etag: Fingerprint,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Precondition Failed")]
    PreconditionFailed,

    #[error(transparent)]
    MalformedPayload(#[from] PayloadError),

    #[error(transparent)]
    InvalidItem(#[from] ItemError),

    #[error("Failed to read current document: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error(transparent)]
    WriteFailed(#[from] PersistError),
}

impl StoreError {
    /// HTTP status the transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::PreconditionFailed => 412,
            StoreError::MalformedPayload(_) | StoreError::InvalidItem(_) => 400,
            StoreError::ReadFailed(_) | StoreError::WriteFailed(_) => 500,
        }
    }

    /// Caller-correctable failures: re-read and resubmit, or fix the payload.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Status, content type and body handed back to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }
}

impl From<&StoreError> for Response {
    fn from(err: &StoreError) -> Self {
        Response::text(err.status_code(), err.to_string())
    }
}
