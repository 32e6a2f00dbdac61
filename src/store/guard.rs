use crate::types::exchange::StoreError;
use crate::types::identifiers::Fingerprint;

/// Stateless optimistic-concurrency check.
///
/// Evaluated fresh on every request against the bytes just read. Admission
/// and commit are separate steps: two callers holding the same valid token
/// can both be admitted, and the later commit wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrencyGuard {
    require_precondition: bool,
}

impl ConcurrencyGuard {
    pub fn new(require_precondition: bool) -> Self {
        Self {
            require_precondition,
        }
    }

    /// Admit or reject a write against `current`. Returns the current fingerprint.
    ///
    /// An absent or empty token is admitted unless a precondition is required.
    pub fn admit(
        &self,
        current: &[u8],
        precondition: Option<&str>,
    ) -> Result<Fingerprint, StoreError> {
        let current_etag = Fingerprint::from_content(current);

        tracing::debug!(
            target: "catalog_store::guard",
            current = %current_etag,
            if_match = precondition.unwrap_or("not set"),
            "Evaluating precondition"
        );

        match precondition.filter(|token| !token.is_empty()) {
            Some(token) if !current_etag.matches(token) => {
                tracing::warn!(
                    target: "catalog_store::guard",
                    current = %current_etag,
                    if_match = token,
                    "Precondition mismatch"
                );
                Err(StoreError::PreconditionFailed)
            }
            Some(_) => Ok(current_etag),
            None if self.require_precondition => Err(StoreError::PreconditionFailed),
            None => Ok(current_etag),
        }
    }
}
