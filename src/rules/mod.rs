//! Reconciliation rules.
//!
//! Each asset kind gets an [`AssetValidator`]. The reconciling functions in
//! [`phrases`] and [`templates`] are pure: they take only the inputs they
//! need (usage index, owned entries, a catalog handle) and return findings,
//! so they can be tested without touching the filesystem.
//!
//! ## Module Structure
//!
//! - `phrases`: not found / not used / shared phrases
//! - `templates`: not found / shared / out-of-sync templates

pub mod phrases;
pub mod templates;

pub use phrases::{PhraseValidator, check_phrases};
pub use templates::{TemplateSources, TemplateValidator, check_templates, find_stale_templates};

use crate::{
    core::{AuditContext, catalog::CatalogRepository},
    error::Result,
    issues::{AssetFindings, AssetKind, Report},
};

/// One asset kind's trip through extract, load and reconcile.
pub trait AssetValidator {
    /// Usage index built from the add-on's source files.
    type Usages;
    /// What the add-on owns, as far as this kind is concerned.
    type Owned;

    fn kind(&self) -> AssetKind;

    fn extract(&self, ctx: &AuditContext) -> Result<Self::Usages>;

    fn load_owned(&self, ctx: &AuditContext, catalog: &dyn CatalogRepository)
    -> Result<Self::Owned>;

    fn reconcile(
        &self,
        ctx: &AuditContext,
        usages: Self::Usages,
        owned: Self::Owned,
        catalog: &dyn CatalogRepository,
    ) -> Result<AssetFindings>;
}

/// Run one validator to completion.
///
/// Stops at the first fatal error; findings are only returned once the whole
/// add-on has been reconciled.
pub fn run_validator<V: AssetValidator>(
    validator: &V,
    ctx: &AuditContext,
    catalog: &dyn CatalogRepository,
) -> Result<AssetFindings> {
    let kind = validator.kind();
    tracing::debug!(%kind, files = ctx.files.len(), "scanned");

    let usages = validator.extract(ctx)?;
    tracing::debug!(%kind, "extracted");

    let owned = validator.load_owned(ctx, catalog)?;
    tracing::debug!(%kind, "catalog loaded");

    let findings = validator.reconcile(ctx, usages, owned, catalog)?;
    tracing::debug!(
        %kind,
        errors = findings.error_count(),
        warnings = findings.warning_count(),
        "reconciled"
    );

    Ok(findings)
}
