//! Reference extraction: lexical scans of raw file content.
//!
//! Extraction is deliberately pattern based and syntax agnostic so the same
//! scan works on PHP, templates, JavaScript and XML alike. Files are read as
//! bytes; nothing requires them to be valid UTF-8.
//!
//! ## Module Structure
//!
//! - `phrase`: `phrase('id')` style references
//! - `template`: `template="id"`, `admin:id` and `public:id` references

pub mod phrase;
pub mod template;

pub use phrase::{extract_phrases, phrase_references};
pub use template::{TemplateExtraction, TemplateReference, extract_templates, template_references};

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::error::{AuditError, Result};

/// The files of one add-on, as seen by the extractors.
pub struct SourceTree<'a> {
    pub addon_dir: &'a Path,
    pub files: &'a [PathBuf],
    /// Name of the legacy data directory whose content is never scanned.
    pub data_dir: &'a str,
}

impl<'a> SourceTree<'a> {
    /// Files eligible for reference extraction.
    pub fn source_files(&self) -> Vec<&'a Path> {
        self.files
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| !is_legacy_data(path, self.addon_dir, self.data_dir))
            .collect()
    }

    /// Read every source file in parallel and run `extract` on it.
    ///
    /// Per-file results come back in scan order.
    pub(crate) fn map_files<T, F>(&self, extract: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Path, &[u8]) -> Result<T> + Sync,
    {
        self.source_files()
            .par_iter()
            .map(|path| {
                let content = fs::read(path).map_err(|source| AuditError::io(*path, source))?;
                extract(path, &content)
            })
            .collect()
    }
}

/// True when `path` lies in the add-on's legacy data directory (at any depth).
pub fn is_legacy_data(path: &Path, addon_dir: &Path, data_dir: &str) -> bool {
    path.strip_prefix(addon_dir)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str() == data_dir)
}
