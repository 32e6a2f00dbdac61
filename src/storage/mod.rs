pub mod backup;
pub mod config;
pub mod persist;

pub use backup::{Archiver, BackupArchiver, BackupOutcome};
pub use config::StoreConfig;
pub use persist::{AtomicPersister, PersistError, Persister, EMPTY_DOCUMENT};
