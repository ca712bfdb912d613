//! Runs the selected validators for one add-on.
//!
//! # Returns
//! - `Ok(RunResult)` with every validator's findings
//! - `Err` if the run cannot complete (missing add-on, unreadable catalog,
//!   ambiguous template reference, I/O failure)

use std::path::PathBuf;

use anyhow::Result;

use super::{
    args::{Arguments, CheckKind},
    exit_status::ExitStatus,
};
use crate::{
    core::AuditContext,
    issues::{AssetFindings, Report},
    rules::{PhraseValidator, TemplateValidator, run_validator},
};

/// Result of one `validate` invocation.
pub struct RunResult {
    pub addon_id: String,
    /// Reported paths are shown relative to this directory.
    pub root_dir: PathBuf,
    /// Number of files references were extracted from.
    pub files_checked: usize,
    /// One entry per validator, in report order.
    pub findings: Vec<AssetFindings>,
}

impl RunResult {
    pub fn error_count(&self) -> usize {
        self.findings.iter().map(Report::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.iter().map(Report::warning_count).sum()
    }

    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Advisory sections never fail the run.
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::from_error_count(self.error_count())
    }
}

pub fn run(args: &Arguments) -> Result<RunResult> {
    let ctx = AuditContext::new(&args.addon_id, &args.common)?;
    let catalog = ctx.open_catalog()?;

    let mut findings = Vec::new();
    for check in args.checks() {
        let result = match check {
            CheckKind::Phrases => run_validator(&PhraseValidator, &ctx, &catalog)?,
            CheckKind::Templates => run_validator(&TemplateValidator, &ctx, &catalog)?,
        };
        findings.push(result);
    }

    let result = RunResult {
        addon_id: ctx.addon_id.clone(),
        root_dir: ctx.root_dir.clone(),
        files_checked: ctx.source_tree().source_files().len(),
        findings,
    };
    tracing::debug!(
        addon_id = %result.addon_id,
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validation finished"
    );

    Ok(result)
}
