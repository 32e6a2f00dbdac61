//! Optimistic-concurrency, atomically persisted JSON product catalog.
//!
//! `catalog-store` keeps a single JSON document on disk. Every write is
//! checked against a caller-supplied fingerprint (an ETag), validated,
//! snapshotted to a timestamped backup, and swapped in with a
//! write-then-rename so readers never see a partial file.

pub mod catalog;
pub mod storage;
pub mod store;
pub mod types;

pub use storage::StoreConfig;
pub use store::{CatalogStore, ConcurrencyGuard};
pub use types::{Fingerprint, Response, SaveOutcome, SaveRequest, StoreError};
