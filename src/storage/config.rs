use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// On-disk layout of one catalog: the document, its staging files and backups.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreConfig {
    pub document_path: PathBuf,
    pub backup_dir: PathBuf,
    pub backup_prefix: String,
    pub staging_suffix: String,
    /// Reject writes that carry no precondition token.
    pub require_precondition: bool,
}

impl StoreConfig {
    /// Default layout under `root`: `products.json` plus a `backups/` directory.
    pub fn at_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            document_path: root.join("products.json"),
            backup_dir: root.join("backups"),
            backup_prefix: "products".into(),
            staging_suffix: ".tmp".into(),
            require_precondition: false,
        }
    }

    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = path.into();
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    pub fn with_backup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.backup_prefix = prefix.into();
        self
    }

    pub fn with_require_precondition(mut self, required: bool) -> Self {
        self.require_precondition = required;
        self
    }

    /// Directory that holds staging files: the document's own directory.
    pub fn staging_dir(&self) -> PathBuf {
        match self.document_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// File-name prefix of per-commit staging files: `products.json` -> `products.json.tmp.`.
    /// Each commit appends a random suffix so concurrent writers never share one.
    pub fn staging_prefix(&self) -> OsString {
        let mut name: OsString = self
            .document_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(&self.staging_suffix);
        name.push(".");
        name
    }
}
