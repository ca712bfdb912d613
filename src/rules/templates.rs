//! Template reconciliation.
//!
//! Resolution mirrors phrases, keyed by (type, title). On top of that every
//! template in the add-on's export must have an identical generated file in
//! the output directory.

use super::AssetValidator;
use crate::{
    core::{
        AuditContext, TemplateKey, WildcardPattern,
        catalog::{CatalogRepository, TemplateEntry},
        export::{ExportedTemplate, load_template_export, output_template_path, read_output_template},
        extract::{TemplateExtraction, extract_templates},
        is_wildcard,
    },
    error::Result,
    issues::{AssetFindings, AssetKind, SharedAsset, TemplateFindings},
};

pub struct TemplateValidator;

/// Templates the add-on owns, from the catalog and from its own export file.
#[derive(Debug, Default)]
pub struct TemplateSources {
    pub owned: Vec<TemplateEntry>,
    pub exported: Vec<ExportedTemplate>,
}

impl AssetValidator for TemplateValidator {
    type Usages = TemplateExtraction;
    type Owned = TemplateSources;

    fn kind(&self) -> AssetKind {
        AssetKind::Template
    }

    fn extract(&self, ctx: &AuditContext) -> Result<TemplateExtraction> {
        extract_templates(&ctx.source_tree(), &ctx.config.templates_output_dir)
    }

    fn load_owned(
        &self,
        ctx: &AuditContext,
        catalog: &dyn CatalogRepository,
    ) -> Result<TemplateSources> {
        Ok(TemplateSources {
            owned: catalog.templates_owned_by(&ctx.addon_id)?,
            exported: load_template_export(&ctx.template_export_path())?,
        })
    }

    fn reconcile(
        &self,
        ctx: &AuditContext,
        usages: TemplateExtraction,
        sources: TemplateSources,
        catalog: &dyn CatalogRepository,
    ) -> Result<AssetFindings> {
        let mut findings =
            check_templates(usages, &sources.owned, catalog, &ctx.addon_id)?;

        findings.not_synced = find_stale_templates(&sources.exported, |key| {
            let path = output_template_path(
                &ctx.addon_dir,
                &ctx.config.templates_output_dir,
                key,
                &ctx.config.template_extension,
            );
            read_output_template(&path)
        })?;

        Ok(findings.into())
    }
}

/// Reconcile template usages against what `addon_id` owns.
///
/// A wildcard resolves against every owned template whatever its type. Any
/// template owned by another add-on, the platform included, is shared.
///
/// Fills everything except `not_synced`, which needs the output directory.
pub fn check_templates(
    extraction: TemplateExtraction,
    owned: &[TemplateEntry],
    catalog: &dyn CatalogRepository,
    addon_id: &str,
) -> Result<TemplateFindings> {
    let mut findings = TemplateFindings::default();

    for (key, occurrences) in extraction.usages {
        if is_wildcard(&key.title) {
            if WildcardPattern::new(&key.title)?.first_match(owned).is_some() {
                continue;
            }
        }

        match catalog.find_template(&key.title, key.template_type)? {
            None => {
                findings.not_found.insert(key, occurrences);
            }
            Some(entry) if entry.addon_id != addon_id => {
                findings
                    .shared
                    .push(SharedAsset::new(key.to_string(), entry.addon_id));
            }
            Some(_) => {}
        }
    }

    findings.recommend_wildcard = extraction.recommend_wildcard.into_iter().collect();

    Ok(findings)
}

/// Exported templates whose generated file is missing or differs byte for
/// byte from the exported content.
///
/// `read_output` returns the generated file's bytes, or `None` if absent.
pub fn find_stale_templates<F>(exported: &[ExportedTemplate], read_output: F) -> Result<Vec<TemplateKey>>
where
    F: Fn(&TemplateKey) -> Result<Option<Vec<u8>>>,
{
    let mut stale = Vec::new();

    for template in exported {
        let in_sync = read_output(&template.key)?
            .is_some_and(|bytes| bytes == template.content.as_bytes());
        if !in_sync {
            stale.push(template.key.clone());
        }
    }

    Ok(stale)
}
