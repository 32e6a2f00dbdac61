use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

const INDENT: &[u8] = b"    ";

/// Serialize a catalog document for storage.
///
/// Four-space pretty printing, key order as received, `/` left unescaped,
/// and exactly one trailing newline.
pub fn encode_document(document: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;

    if !out.ends_with(b"\n") {
        out.push(b'\n');
    }
    Ok(out)
}
