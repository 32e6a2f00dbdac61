use serde_json::{Map, Value};
use thiserror::Error;

pub const PRODUCTS_KEY: &str = "products";
pub const ID_KEY: &str = "id";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Payload must be a JSON array of products or an object with a products array")]
    UnrecognizedShape,
}

/// Top-level layouts a catalog payload may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `[{"id": ...}, ...]`
    FlatList,
    /// `{"products": [...], ...siblings}`
    Envelope,
}

type ShapeProbe = fn(&Value) -> bool;

/// Probed in order; the first match wins. A flat list is always tried
/// before an envelope.
const SHAPE_PROBES: [(PayloadShape, ShapeProbe); 2] = [
    (PayloadShape::FlatList, is_flat_list),
    (PayloadShape::Envelope, is_envelope),
];

fn is_flat_list(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get(ID_KEY))
        .is_some_and(|id| !id.is_null())
}

fn is_envelope(value: &Value) -> bool {
    value
        .get(PRODUCTS_KEY)
        .and_then(Value::as_array)
        .is_some_and(|products| !products.is_empty())
}

pub fn detect_shape(value: &Value) -> Option<PayloadShape> {
    SHAPE_PROBES
        .iter()
        .find(|(_, probe)| probe(value))
        .map(|(shape, _)| *shape)
}

/// A decoded payload split into its product list and, for the envelope
/// shape, the enclosing object.
#[derive(Debug, Clone)]
pub struct CatalogPayload {
    shape: PayloadShape,
    products: Vec<Value>,
    // Holds the `products` slot as Null while the list is checked out,
    // so the key keeps its position on write-back.
    envelope: Option<Map<String, Value>>,
}

impl CatalogPayload {
    /// Decode raw request bytes and extract the product list.
    pub fn from_slice(raw: &[u8]) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_slice(raw)?;
        Self::extract(value)
    }

    pub fn extract(value: Value) -> Result<Self, PayloadError> {
        let shape = detect_shape(&value).ok_or(PayloadError::UnrecognizedShape)?;

        match (shape, value) {
            (PayloadShape::FlatList, Value::Array(products)) => Ok(CatalogPayload {
                shape,
                products,
                envelope: None,
            }),
            (PayloadShape::Envelope, Value::Object(mut envelope)) => {
                let products = match envelope.get_mut(PRODUCTS_KEY).map(Value::take) {
                    Some(Value::Array(products)) => products,
                    _ => return Err(PayloadError::UnrecognizedShape),
                };
                Ok(CatalogPayload {
                    shape,
                    products,
                    envelope: Some(envelope),
                })
            }
            _ => Err(PayloadError::UnrecognizedShape),
        }
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }

    pub fn products(&self) -> &[Value] {
        &self.products
    }

    /// Reassemble the document in the shape it arrived in.
    pub fn into_document(self) -> Value {
        match self.envelope {
            Some(mut envelope) => {
                envelope.insert(PRODUCTS_KEY.to_string(), Value::Array(self.products));
                Value::Object(envelope)
            }
            None => Value::Array(self.products),
        }
    }
}
