//! Phrase reconciliation.
//!
//! A used identifier is satisfied by an exact title the add-on owns, by a
//! wildcard matching one of its own titles, or by a catalog entry owned by the
//! add-on itself. Entries owned by another add-on are reported as shared,
//! except for the platform's own phrases which every add-on may use.

use std::collections::HashSet;

use super::AssetValidator;
use crate::{
    config::Config,
    core::{
        AuditContext, PhraseUsages, WildcardPattern,
        catalog::{CatalogRepository, PhraseEntry},
        extract::extract_phrases,
        is_wildcard,
    },
    error::Result,
    issues::{AssetFindings, AssetKind, PhraseFindings, SharedAsset},
};

pub struct PhraseValidator;

impl AssetValidator for PhraseValidator {
    type Usages = PhraseUsages;
    type Owned = Vec<PhraseEntry>;

    fn kind(&self) -> AssetKind {
        AssetKind::Phrase
    }

    fn extract(&self, ctx: &AuditContext) -> Result<PhraseUsages> {
        extract_phrases(&ctx.source_tree())
    }

    fn load_owned(
        &self,
        ctx: &AuditContext,
        catalog: &dyn CatalogRepository,
    ) -> Result<Vec<PhraseEntry>> {
        catalog.phrases_owned_by(&ctx.addon_id)
    }

    fn reconcile(
        &self,
        ctx: &AuditContext,
        usages: PhraseUsages,
        owned: Vec<PhraseEntry>,
        catalog: &dyn CatalogRepository,
    ) -> Result<AssetFindings> {
        check_phrases(&usages, &owned, catalog, &ctx.addon_id, &ctx.config).map(Into::into)
    }
}

/// Reconcile phrase usages against what `addon_id` owns.
///
/// # Arguments
/// * `usages` - Phrase identifiers referenced from the add-on's files
/// * `owned` - Phrases the add-on owns, in catalog order
/// * `catalog` - Global lookup for identifiers the add-on does not own
/// * `config` - Platform add-on id and the unused-prefix allow-list
pub fn check_phrases(
    usages: &PhraseUsages,
    owned: &[PhraseEntry],
    catalog: &dyn CatalogRepository,
    addon_id: &str,
    config: &Config,
) -> Result<PhraseFindings> {
    let owned_titles: HashSet<&str> = owned.iter().map(|p| p.title.as_str()).collect();
    let mut findings = PhraseFindings::default();

    for (id, occurrences) in usages.iter() {
        if owned_titles.contains(id.as_str()) {
            continue;
        }
        if is_wildcard(id) && WildcardPattern::new(id)?.first_match(owned).is_some() {
            continue;
        }

        match catalog.find_phrase(id)? {
            None => {
                findings.not_found.insert(id.clone(), occurrences.to_vec());
            }
            Some(entry) if is_shared(&entry.addon_id, addon_id, config) => {
                findings.shared.push(SharedAsset::new(id, entry.addon_id));
            }
            Some(_) => {}
        }
    }

    findings.not_used = owned
        .iter()
        .map(|p| p.title.as_str())
        .filter(|title| !usages.contains_key(*title))
        .filter(|title| !config.is_reflected_phrase(title))
        .map(str::to_string)
        .collect();

    Ok(findings)
}

/// Owned by another add-on that is not the platform itself.
fn is_shared(owner: &str, addon_id: &str, config: &Config) -> bool {
    owner != addon_id && owner != config.platform_add_on_id
}
