use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::payload::ID_KEY;
use crate::types::identifiers::ProductId;

/// First structural violation found in a product list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Item {index} missing non-empty 'id'")]
    MissingId { index: usize },
    #[error("Duplicate id: {id}")]
    DuplicateId { index: usize, id: ProductId },
}

impl ItemError {
    pub fn index(&self) -> usize {
        match self {
            ItemError::MissingId { index } | ItemError::DuplicateId { index, .. } => *index,
        }
    }
}

/// Check every product in order, stopping at the first offence.
///
/// Returns the identifiers in list order.
pub fn validate_products(products: &[Value]) -> Result<Vec<ProductId>, ItemError> {
    let mut seen = HashSet::with_capacity(products.len());
    let mut ids = Vec::with_capacity(products.len());

    for (index, product) in products.iter().enumerate() {
        let id = product
            .as_object()
            .and_then(|fields| fields.get(ID_KEY))
            .and_then(ProductId::from_value)
            .ok_or(ItemError::MissingId { index })?;

        if !seen.insert(id.clone()) {
            return Err(ItemError::DuplicateId { index, id });
        }
        ids.push(id);
    }

    Ok(ids)
}
