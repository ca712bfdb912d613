use std::path::Path;

use walkdir::WalkDir;

use super::{InMemoryCatalog, PhraseEntry, TemplateEntry};
use crate::core::export::{
    PHRASES_FILE_NAME, TEMPLATES_FILE_NAME, load_phrase_export, load_template_export,
};
use crate::error::Result;
use crate::utils::display_relative;

/// Build a catalog from the `_data` exports of every add-on under
/// `addons_root`.
///
/// An add-on's id is its directory path relative to the root, so
/// `src/addons/Vendor/Forum/_data/phrases.xml` belongs to `Vendor/Forum`.
/// Add-ons are visited in path order, which fixes the catalog order.
pub fn load_addon_data_catalog(addons_root: &Path, data_dir: &str) -> Result<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::default();

    let data_dirs = WalkDir::new(addons_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Cannot access path: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir() && entry.file_name() == data_dir);

    for entry in data_dirs {
        let Some(addon_dir) = entry.path().parent() else {
            continue;
        };
        let addon_id = display_relative(addon_dir, addons_root);
        if addon_id.is_empty() {
            continue;
        }

        let phrases = load_phrase_export(&entry.path().join(PHRASES_FILE_NAME))?;
        let templates = load_template_export(&entry.path().join(TEMPLATES_FILE_NAME))?;

        tracing::debug!(
            addon_id = %addon_id,
            phrases = phrases.len(),
            templates = templates.len(),
            "loaded add-on data"
        );

        catalog.extend_phrases(
            phrases
                .into_iter()
                .map(|title| PhraseEntry::new(title, addon_id.as_str())),
        );
        catalog.extend_templates(templates.into_iter().map(|t| {
            TemplateEntry::new(t.key.template_type, t.key.title, addon_id.as_str(), t.content)
        }));
    }

    Ok(catalog)
}
