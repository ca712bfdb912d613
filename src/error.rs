//! Fatal error types.
//!
//! Findings (missing phrases, stale templates, ...) are never errors: they are
//! collected into the findings types in [`crate::issues`]. Everything here
//! aborts the current invocation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = AuditError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The add-on directory does not exist under the add-ons root.
    #[error("Add-on ({addon_id}) not exists: {}", path.display())]
    AddOnNotFound { addon_id: String, path: PathBuf },

    /// A generic `template="..."` reference was found outside both generated
    /// output subtrees, so its partition cannot be inferred.
    #[error("Unknown template type. Path: {path}")]
    UnknownTemplateType { path: String },

    /// The JSON catalog file is malformed.
    #[error("Failed to parse catalog file {}: {source}", path.display())]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An XML export file (`templates.xml`, `phrases.xml`) is malformed.
    #[error("Failed to parse export file {}: {source}", path.display())]
    ExportParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// An exported template element lacks a usable `type` or `title`.
    #[error("Invalid template element in {}: {reason}", path.display())]
    ExportEntry { path: PathBuf, reason: String },

    #[error("Invalid wildcard identifier '{identifier}': {source}")]
    Wildcard {
        identifier: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
