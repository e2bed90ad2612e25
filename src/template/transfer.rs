//! Template import/export and embedded-binary helpers.
//!
//! Templates travel as pretty-printed JSON files; embedded binaries (base
//! documents, image field content) travel inside them as data URIs. Import
//! never mutates caller state: a parse failure returns an error and the
//! previously loaded template stays as it was.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::SchabloneError;
use crate::template::{BaseDocument, Template};

/// Serialize a template as pretty-printed JSON, the export file format.
pub fn export_json(template: &Template) -> Result<String, SchabloneError> {
    serde_json::to_string_pretty(template)
        .map_err(|e| SchabloneError::Parse(format!("template serialization failed: {e}")))
}

/// File name for an exported template: spaces become underscores.
pub fn export_file_name(display_name: &str) -> String {
    format!("{}.json", display_name.replace(' ', "_"))
}

/// Parse an exported JSON file back into a template.
pub fn import_json(json: &str) -> Result<Template, SchabloneError> {
    serde_json::from_str(json)
        .map_err(|e| SchabloneError::Parse(format!("invalid template JSON: {e}")))
}

/// Encode bytes as a `data:<mime>;base64,` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a data URI into its MIME type and raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), SchabloneError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| SchabloneError::Parse("not a data URI".into()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| SchabloneError::Parse("data URI is not base64-encoded".into()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| SchabloneError::Parse(format!("invalid base64 in data URI: {e}")))?;
    Ok((mime.to_string(), bytes))
}

/// Build an embedded base document from raw image bytes.
pub fn embedded_base(mime: &str, bytes: &[u8], width: f64, height: f64) -> BaseDocument {
    BaseDocument::Embedded {
        data: encode_data_uri(mime, bytes),
        width,
        height,
    }
}

// ============================================================================
// TESTS
// ============================================================================
