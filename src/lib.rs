//! addon-audit - phrase and template reference checker for add-on source trees
//!
//! Scans one add-on's directory for phrase and template references, reconciles
//! them against the asset catalog and the add-on's own exports, and reports
//! missing, unused, shared and out-of-sync assets.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, run, report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, extraction, catalog access and export files
//! - `error`: Fatal error types
//! - `issues`: Finding types and the `Report` trait
//! - `rules`: Phrase and template reconciliation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;
pub mod rules;
pub mod utils;
