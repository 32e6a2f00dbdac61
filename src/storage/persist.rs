use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use thiserror::Error;

use crate::storage::config::StoreConfig;
use crate::types::identifiers::Fingerprint;

/// Contents assumed when no document exists yet.
pub const EMPTY_DOCUMENT: &[u8] = b"[]";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to encode document")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write temp file")]
    Staging(#[source] io::Error),
    #[error("Failed to save file")]
    Commit(#[source] io::Error),
}

/// Storage handle for the single catalog document.
///
/// Implementations own the read and replace of one document location. A
/// backend with a native compare-and-swap can slot in here without callers
/// changing.
pub trait Persister {
    /// Current document bytes, or [`EMPTY_DOCUMENT`] if none exists.
    fn read_current(&self) -> io::Result<Vec<u8>>;

    /// Replace the document and return the fingerprint of `new_bytes`.
    fn commit(&self, new_bytes: &[u8]) -> Result<Fingerprint, PersistError>;
}

/// Write-fsync-rename persistence of a document on the local filesystem.
///
/// Every commit stages into its own uniquely named file beside the document,
/// so concurrent writers never share or truncate each other's staging file.
#[derive(Debug, Clone)]
pub struct AtomicPersister {
    document_path: PathBuf,
    staging_dir: PathBuf,
    staging_prefix: OsString,
}

impl AtomicPersister {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            document_path: config.document_path.clone(),
            staging_dir: config.staging_dir(),
            staging_prefix: config.staging_prefix(),
        }
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Write `bytes` to a fresh staging file. The file is removed again if
    /// the write or the sync fails, or when the returned path is dropped.
    fn stage(&self, bytes: &[u8]) -> io::Result<TempPath> {
        let mut staged = tempfile::Builder::new()
            .prefix(&self.staging_prefix)
            .tempfile_in(&self.staging_dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        Ok(staged.into_temp_path())
    }

    fn commit_with<R>(&self, new_bytes: &[u8], rename: R) -> Result<Fingerprint, PersistError>
    where
        R: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        // A failed staging write leaves the current document untouched.
        let staged = self.stage(new_bytes).map_err(PersistError::Staging)?;

        match rename(&*staged, &self.document_path) {
            Ok(()) => {
                // The staging name is gone; nothing left to clean up.
                let _ = staged.keep();
                self.sync_parent();
            }
            Err(e) => {
                tracing::warn!(
                    target: "catalog_store::persist",
                    path = %self.document_path.display(),
                    error = %e,
                    "Atomic rename failed, overwriting document in place"
                );
                let fallback = write_synced(&self.document_path, new_bytes);
                drop(staged);
                fallback.map_err(PersistError::Commit)?;
            }
        }

        Ok(Fingerprint::from_content(new_bytes))
    }

    fn sync_parent(&self) {
        // Directory fsync is unsupported on some platforms; the rename has
        // already landed either way.
        if let Err(e) = File::open(&self.staging_dir).and_then(|dir| dir.sync_all()) {
            tracing::debug!(
                target: "catalog_store::persist",
                dir = %self.staging_dir.display(),
                error = %e,
                "Could not sync parent directory"
            );
        }
    }
}

impl Persister for AtomicPersister {
    fn read_current(&self) -> io::Result<Vec<u8>> {
        match fs::read(&self.document_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EMPTY_DOCUMENT.to_vec()),
            Err(e) => Err(e),
        }
    }

    fn commit(&self, new_bytes: &[u8]) -> Result<Fingerprint, PersistError> {
        self.commit_with(new_bytes, |from, to| fs::rename(from, to))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
