use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content hash of a catalog document, presented as a quoted hex string.
///
/// Used only as a compare-and-swap token: it is compared, never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        Fingerprint(format!("\"{hex}\""))
    }

    /// Compare against a token presented by a caller, ignoring surrounding whitespace.
    pub fn matches(&self, presented: &str) -> bool {
        presented.trim() == self.0
    }

    /// The wire form, quotes included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Textual form of a product `id` field.
///
/// Strings are taken as-is, numbers use their JSON rendering, `true` reads as
/// `"1"` and `false` as empty. The text is kept untrimmed; emptiness is judged
/// on the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(true) => "1".to_string(),
            _ => return None,
        };

        if text.trim().is_empty() {
            return None;
        }

        Some(ProductId(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
