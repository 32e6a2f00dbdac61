use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::storage::config::StoreConfig;

/// Whether a pre-write snapshot landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Written(PathBuf),
    Skipped { reason: String },
}

/// Best-effort snapshot of the document before it is replaced.
///
/// Never fails the write: errors degrade to [`BackupOutcome::Skipped`].
pub trait Archiver {
    fn snapshot(&self, current: &[u8]) -> BackupOutcome;
}

/// Writes one file per snapshot, named `<prefix>-YYYYMMDD-HHMMSS.json`.
///
/// Two snapshots within the same second share a name; the later one wins.
#[derive(Debug, Clone)]
pub struct BackupArchiver {
    dir: PathBuf,
    prefix: String,
}

impl BackupArchiver {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            dir: config.backup_dir.clone(),
            prefix: config.backup_prefix.clone(),
        }
    }

    pub fn backup_path(&self, at: DateTime<Utc>) -> PathBuf {
        let stamp = at.format("%Y%m%d-%H%M%S");
        self.dir.join(format!("{}-{}.json", self.prefix, stamp))
    }

    pub fn snapshot_at(&self, current: &[u8], at: DateTime<Utc>) -> BackupOutcome {
        let path = self.backup_path(at);
        match self.write(&path, current) {
            Ok(()) => BackupOutcome::Written(path),
            Err(e) => {
                tracing::warn!(
                    target: "catalog_store::backup",
                    path = %path.display(),
                    error = %e,
                    "Backup skipped"
                );
                BackupOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn write(&self, path: &Path, current: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, current)
    }
}

impl Archiver for BackupArchiver {
    fn snapshot(&self, current: &[u8]) -> BackupOutcome {
        self.snapshot_at(current, Utc::now())
    }
}
