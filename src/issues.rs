//! Finding types produced by the reconcilers.
//!
//! Findings are not errors: a run collects every finding across the whole
//! add-on before anything is reported. Each asset kind has its own findings
//! struct; both are rendered through the [`Report`] trait so the CLI reporter
//! never needs to know which kind it is printing.

use std::collections::BTreeMap;

use enum_dispatch::enum_dispatch;

use crate::core::{Occurrence, TemplateKey};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fails the run.
    Error,
    /// Advisory only.
    Warning,
}

/// Classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    NotFound,
    NotUsed,
    NotSynced,
    Shared,
    RecommendWildcard,
}

impl Rule {
    pub fn severity(&self) -> Severity {
        match self {
            Rule::NotFound | Rule::NotUsed | Rule::NotSynced => Severity::Error,
            Rule::Shared | Rule::RecommendWildcard => Severity::Warning,
        }
    }
}

/// Asset kind a validator works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Phrase,
    Template,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Phrase => write!(f, "phrases"),
            AssetKind::Template => write!(f, "templates"),
        }
    }
}

// ============================================================
// Findings
// ============================================================

/// An asset referenced from this add-on but owned by another one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SharedAsset {
    pub identifier: String,
    pub addon_id: String,
}

impl SharedAsset {
    pub fn new(identifier: impl Into<String>, addon_id: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            addon_id: addon_id.into(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhraseFindings {
    /// Used identifiers with no catalog entry, with every place they're used.
    pub not_found: BTreeMap<String, Vec<Occurrence>>,
    /// Titles owned by the add-on that nothing references.
    pub not_used: Vec<String>,
    pub shared: Vec<SharedAsset>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TemplateFindings {
    pub not_found: BTreeMap<TemplateKey, Vec<Occurrence>>,
    pub shared: Vec<SharedAsset>,
    /// Exported templates whose generated output file differs or is missing.
    pub not_synced: Vec<TemplateKey>,
    pub recommend_wildcard: BTreeMap<TemplateKey, Vec<Occurrence>>,
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// One rendered item: a label and, optionally, where it was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    pub label: String,
    pub occurrences: Vec<Occurrence>,
}

impl ReportItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            occurrences: Vec::new(),
        }
    }

    pub fn with_occurrences(mut self, occurrences: &[Occurrence]) -> Self {
        self.occurrences = occurrences.to_vec();
        self
    }
}

/// A non-empty group of findings sharing one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub rule: Rule,
    pub heading: &'static str,
    pub items: Vec<ReportItem>,
}

/// Trait for findings that can be reported to the CLI.
///
/// Uses `enum_dispatch` for dispatch on the [`AssetFindings`] enum.
#[enum_dispatch]
pub trait Report {
    fn kind(&self) -> AssetKind;

    /// Sections to print, in order. Empty sections are omitted.
    fn sections(&self) -> Vec<ReportSection>;

    /// True when nothing in these findings fails the run.
    fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.sections()
            .iter()
            .filter(|s| s.rule.severity() == severity)
            .map(|s| s.items.len())
            .sum()
    }
}

/// Findings of one validator run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetFindings {
    Phrases(PhraseFindings),
    Templates(TemplateFindings),
}

// ============================================================
// Report Implementations
// ============================================================

fn section(rule: Rule, heading: &'static str, items: Vec<ReportItem>) -> Option<ReportSection> {
    (!items.is_empty()).then_some(ReportSection {
        rule,
        heading,
        items,
    })
}

fn shared_items(shared: &[SharedAsset]) -> Vec<ReportItem> {
    shared
        .iter()
        .map(|s| ReportItem::new(format!("{} - {}", s.identifier, s.addon_id)))
        .collect()
}

impl Report for PhraseFindings {
    fn kind(&self) -> AssetKind {
        AssetKind::Phrase
    }

    fn sections(&self) -> Vec<ReportSection> {
        [
            section(
                Rule::NotFound,
                "Phrases not found:",
                self.not_found
                    .iter()
                    .map(|(id, occurrences)| ReportItem::new(id).with_occurrences(occurrences))
                    .collect(),
            ),
            section(
                Rule::NotUsed,
                "Phrases not used any where:",
                self.not_used.iter().map(ReportItem::new).collect(),
            ),
            section(
                Rule::Shared,
                "Phrases shared by add-on:",
                shared_items(&self.shared),
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Report for TemplateFindings {
    fn kind(&self) -> AssetKind {
        AssetKind::Template
    }

    fn sections(&self) -> Vec<ReportSection> {
        [
            section(
                Rule::NotFound,
                "Templates not found:",
                self.not_found
                    .iter()
                    .map(|(key, occurrences)| {
                        ReportItem::new(key.to_string()).with_occurrences(occurrences)
                    })
                    .collect(),
            ),
            section(
                Rule::NotSynced,
                "Templates not updated:",
                self.not_synced
                    .iter()
                    .map(|key| ReportItem::new(key.to_string()))
                    .collect(),
            ),
            section(
                Rule::Shared,
                "Templates shared by add-on:",
                shared_items(&self.shared),
            ),
            section(
                Rule::RecommendWildcard,
                "Recommend to use wildcard template:",
                self.recommend_wildcard
                    .iter()
                    .map(|(key, occurrences)| {
                        ReportItem::new(format!("{} => {}*", key, key)).with_occurrences(occurrences)
                    })
                    .collect(),
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
