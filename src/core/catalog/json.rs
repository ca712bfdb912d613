use std::{fs, path::Path};

use serde::Deserialize;

use super::{InMemoryCatalog, PhraseEntry, TemplateEntry};
use crate::error::{AuditError, Result};

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    phrases: Vec<PhraseEntry>,
    #[serde(default)]
    templates: Vec<TemplateEntry>,
}

/// Load a catalog dump:
///
/// ```json
/// {
///   "phrases": [{ "title": "hello", "addonId": "Foo" }],
///   "templates": [{ "title": "index", "type": "public", "addonId": "Foo", "content": "..." }]
/// }
/// ```
pub fn load_json_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let content = fs::read_to_string(path).map_err(|source| AuditError::io(path, source))?;
    let file: CatalogFile =
        serde_json::from_str(&content).map_err(|source| AuditError::CatalogFormat {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %path.display(),
        phrases = file.phrases.len(),
        templates = file.templates.len(),
        "loaded JSON catalog"
    );

    Ok(InMemoryCatalog::new(file.phrases, file.templates))
}
