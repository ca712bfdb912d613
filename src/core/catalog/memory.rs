use super::{CatalogRepository, PhraseEntry, TemplateEntry};
use crate::core::usage::TemplateType;
use crate::error::Result;

/// Catalog held in memory, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    phrases: Vec<PhraseEntry>,
    templates: Vec<TemplateEntry>,
}

impl InMemoryCatalog {
    pub fn new(phrases: Vec<PhraseEntry>, templates: Vec<TemplateEntry>) -> Self {
        Self { phrases, templates }
    }

    pub fn with_phrase(mut self, title: &str, addon_id: &str) -> Self {
        self.phrases.push(PhraseEntry::new(title, addon_id));
        self
    }

    pub fn with_template(
        mut self,
        template_type: TemplateType,
        title: &str,
        addon_id: &str,
        content: &str,
    ) -> Self {
        self.templates
            .push(TemplateEntry::new(template_type, title, addon_id, content));
        self
    }

    pub fn extend_phrases(&mut self, phrases: impl IntoIterator<Item = PhraseEntry>) {
        self.phrases.extend(phrases);
    }

    pub fn extend_templates(&mut self, templates: impl IntoIterator<Item = TemplateEntry>) {
        self.templates.extend(templates);
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn find_phrase(&self, title: &str) -> Result<Option<PhraseEntry>> {
        Ok(self.phrases.iter().find(|p| p.title == title).cloned())
    }

    fn find_template(
        &self,
        title: &str,
        template_type: TemplateType,
    ) -> Result<Option<TemplateEntry>> {
        Ok(self
            .templates
            .iter()
            .find(|t| t.title == title && t.template_type == template_type)
            .cloned())
    }

    fn phrases_owned_by(&self, addon_id: &str) -> Result<Vec<PhraseEntry>> {
        Ok(self
            .phrases
            .iter()
            .filter(|p| p.addon_id == addon_id)
            .cloned()
            .collect())
    }

    fn templates_owned_by(&self, addon_id: &str) -> Result<Vec<TemplateEntry>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| t.addon_id == addon_id)
            .cloned()
            .collect())
    }
}
