//! Classification of retrieved documents.

use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::ProductEntry;
use crate::error::{IngestError, Result};
use crate::source::DocumentSource;

/// A retrieved product document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDocument {
    /// A JSON object with the product's sections.
    Structured(Map<String, Value>),
    /// A pointer at another product's description.
    Alias { target: String },
}

impl LoadedDocument {
    #[must_use]
    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias { .. })
    }
}

/// Alias target named by alias document content: the text up to the first `.`.
///
/// ```
/// assert_eq!(pmu_ingest::alias_target("neoverse-n2-r0p3.json\n"), "neoverse-n2-r0p3");
/// ```
#[must_use]
pub fn alias_target(content: &str) -> String {
    let trimmed = content.trim();
    trimmed.split('.').next().unwrap_or(trimmed).trim().to_string()
}

/// Classify raw bytes: a JSON object is structured, any other text is an alias.
///
/// # Errors
///
/// Returns [`IngestError::NotText`] when the bytes are not UTF-8.
pub fn parse_document(bytes: &[u8], location: &str) -> Result<LoadedDocument> {
    let text = std::str::from_utf8(bytes).map_err(|_| IngestError::NotText {
        location: location.to_string(),
    })?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(LoadedDocument::Structured(map)),
        _ => Ok(LoadedDocument::Alias {
            target: alias_target(text),
        }),
    }
}

/// Fetch and classify the document for `entry`.
///
/// # Errors
///
/// Returns an [`IngestError`] when retrieval fails or the content is not text.
pub fn load_document(source: &dyn DocumentSource, entry: &ProductEntry) -> Result<LoadedDocument> {
    let location = source.locate(entry);
    let bytes = source.fetch(entry)?;
    let document = parse_document(&bytes, &location)?;
    if let LoadedDocument::Alias { target } = &document {
        debug!(product = %entry.product, %target, "document is an alias");
    }
    Ok(document)
}
