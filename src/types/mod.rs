pub mod exchange;
pub mod identifiers;

pub use exchange::{CatalogSnapshot, Response, SaveOutcome, SaveRequest, SaveResponse, StoreError};
pub use identifiers::{Fingerprint, ProductId};
