//! Read-only access to the authoritative asset catalog.
//!
//! Rules only talk to [`CatalogRepository`]. Concrete stores:
//!
//! - [`InMemoryCatalog`]: plain vectors, used by tests and as the backing
//!   store of the loaders below
//! - [`load_json_catalog`]: a JSON dump of the catalog
//! - [`load_addon_data_catalog`]: every add-on's `_data` export under the
//!   add-ons root

mod addon_data;
mod json;
mod memory;

pub use addon_data::load_addon_data_catalog;
pub use json::load_json_catalog;
pub use memory::InMemoryCatalog;

use serde::{Deserialize, Serialize};

use crate::core::usage::TemplateType;
use crate::error::Result;

/// Anything identified by a catalog title.
pub trait Titled {
    fn title(&self) -> &str;
}

/// A phrase as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseEntry {
    pub title: String,
    pub addon_id: String,
}

impl PhraseEntry {
    pub fn new(title: impl Into<String>, addon_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            addon_id: addon_id.into(),
        }
    }
}

impl Titled for PhraseEntry {
    fn title(&self) -> &str {
        &self.title
    }
}

/// A template as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub title: String,
    pub addon_id: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    #[serde(default)]
    pub content: String,
}

impl TemplateEntry {
    pub fn new(
        template_type: TemplateType,
        title: impl Into<String>,
        addon_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            addon_id: addon_id.into(),
            template_type,
            content: content.into(),
        }
    }
}

impl Titled for TemplateEntry {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Queries the reconcilers need from the catalog store.
///
/// `*_owned_by` results keep the store's natural order; wildcard resolution
/// picks the first match in that order.
pub trait CatalogRepository {
    /// Any phrase with exactly this title, whoever owns it.
    fn find_phrase(&self, title: &str) -> Result<Option<PhraseEntry>>;

    /// Any template with exactly this title and type, whoever owns it.
    fn find_template(
        &self,
        title: &str,
        template_type: TemplateType,
    ) -> Result<Option<TemplateEntry>>;

    fn phrases_owned_by(&self, addon_id: &str) -> Result<Vec<PhraseEntry>>;

    fn templates_owned_by(&self, addon_id: &str) -> Result<Vec<TemplateEntry>>;
}
