//! JSON rendering for layout documents.

use crate::error::{Error, Result};
use crate::model::LayoutDocument;
use serde::Serialize;

use super::RenderOptions;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &LayoutDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert a document to JSON with render options applied.
///
/// When metadata is switched off the `metadata` member is left out, so the
/// output only describes the page and its paragraphs.
pub fn render_json(doc: &LayoutDocument, options: &RenderOptions) -> Result<String> {
    if options.include_metadata {
        return serialize(doc, options.json_format);
    }

    let mut value = serde_json::to_value(doc)?;
    if let Some(members) = value.as_object_mut() {
        members.remove("metadata");
    }
    serialize(&value, options.json_format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
