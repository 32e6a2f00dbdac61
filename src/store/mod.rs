pub mod guard;

use crate::catalog::{encode_document, validate_products, CatalogPayload};
use crate::storage::{
	Archiver, AtomicPersister, BackupArchiver, PersistError, Persister, StoreConfig,
};
use crate::types::exchange::{
	CatalogSnapshot, Response, SaveOutcome, SaveRequest, StoreError,
};
use crate::types::identifiers::Fingerprint;
pub use guard::ConcurrencyGuard;

/// Guarded, validated, atomically persisted catalog document.
///
/// Holds no lock. Safety against lost updates comes from the caller echoing
/// the fingerprint it last read; see [`ConcurrencyGuard`] for the race that
/// remains between admission and commit.
pub struct CatalogStore<P, A> {
	guard: ConcurrencyGuard,
	persister: P,
	archiver: A,
}

impl CatalogStore<AtomicPersister, BackupArchiver> {
	/// Filesystem-backed store using the layout in `config`.
	pub fn open(config: &StoreConfig) -> Self {
		Self {
			guard: ConcurrencyGuard::new(config.require_precondition),
			persister: AtomicPersister::new(config),
			archiver: BackupArchiver::new(config),
		}
	}
}

impl<P, A> CatalogStore<P, A>
where
	P: Persister,
	A: Archiver,
{
	pub fn new(guard: ConcurrencyGuard, persister: P, archiver: A) -> Self {
		Self {
			guard,
			persister,
			archiver,
		}
	}

	/// Current document bytes and the fingerprint to present on the next write.
	pub fn current(&self) -> Result<CatalogSnapshot, StoreError> {
		let bytes = self.persister.read_current().map_err(StoreError::ReadFailed)?;
		let etag = Fingerprint::from_content(&bytes);
		Ok(CatalogSnapshot { bytes, etag })
	}

	pub fn save(&self, request: &SaveRequest) -> Result<SaveOutcome, StoreError> {
		// 1. Concurrency check against what is on disk right now
		let current = self.persister.read_current().map_err(StoreError::ReadFailed)?;
		self.guard.admit(&current, request.if_match.as_deref())?;

		// 2. Shape and item checks
		let payload = CatalogPayload::from_slice(&request.body)?;
		validate_products(payload.products())?;
		let product_count = payload.products().len();

		// 3. Write-back in the shape the caller sent
		let new_bytes = encode_document(&payload.into_document())
			.map_err(|e| StoreError::WriteFailed(PersistError::Encode(e)))?;

		// 4. Snapshot, then replace
		let backup = self.archiver.snapshot(&current);
		let etag = self.persister.commit(&new_bytes)?;

		tracing::info!(
			target: "catalog_store::store",
			etag = %etag,
			products = product_count,
			"Catalog saved"
		);

		Ok(SaveOutcome {
			etag,
			product_count,
			backup,
		})
	}

	/// Run [`save`](Self::save) and render the outcome for the transport layer.
	pub fn handle(&self, request: &SaveRequest) -> Response {
		let outcome = self.save(request);
		let body = outcome.and_then(|saved| {
			serde_json::to_string(&saved.response_body())
				.map_err(|e| StoreError::WriteFailed(PersistError::Encode(e)))
		});

		match body {
			Ok(body) => Response::json(200, body),
			Err(err) => {
				if !err.is_client_error() {
					tracing::error!(
						target: "catalog_store::store",
						error = %err,
						"Catalog save failed"
					);
				}
				Response::from(&err)
			}
		}
	}
}
