pub mod encode;
pub mod payload;
pub mod validate;

pub use encode::encode_document;
pub use payload::{detect_shape, CatalogPayload, PayloadError, PayloadShape};
pub use validate::{validate_products, ItemError};
