//! Core analysis engine.
//!
//! A run goes through the same stages for every asset kind:
//!
//! 1. **Scan**: [`AuditContext`] lists the add-on's files
//! 2. **Extract**: [`extract`] turns file contents into usage indexes
//! 3. **Load**: [`catalog`] and [`export`] provide what the add-on owns
//!
//! Reconciliation itself lives in [`crate::rules`].

pub mod catalog;
pub mod context;
pub mod export;
pub mod extract;
pub mod file_scanner;
pub mod identifier;
pub mod usage;

pub use context::AuditContext;
pub use identifier::{WildcardPattern, is_wildcard, normalize_phrase_id};
pub use usage::{Occurrence, PhraseUsages, TemplateKey, TemplateType, TemplateUsages, UsageIndex};
