//! CLI argument definitions using clap.
//!
//! The binary takes one add-on id and runs the phrase and template
//! validators against it:
//!
//! ```text
//! validate Vendor/AddOn [--check phrases] [--addons-root DIR] [--catalog FILE] [-v]
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "validate", author, version, about, long_about = None)]
pub struct Arguments {
    /// Add-on id, i.e. its directory relative to the add-ons root
    pub addon_id: String,

    /// Validators to run (default: all)
    #[arg(long, value_enum)]
    pub check: Vec<CheckKind>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Arguments {
    /// Validators selected on the command line, or all of them.
    pub fn checks(&self) -> Vec<CheckKind> {
        if self.check.is_empty() {
            CheckKind::all().to_vec()
        } else {
            CheckKind::all()
                .iter()
                .copied()
                .filter(|kind| self.check.contains(kind))
                .collect()
        }
    }
}

/// Common arguments shared by all validators.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory to start the config file search from (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Add-ons root directory (overrides config file)
    #[arg(long)]
    pub addons_root: Option<PathBuf>,

    /// JSON catalog file (overrides config file)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    Phrases,
    Templates,
}

impl CheckKind {
    /// All validators, in report order.
    pub fn all() -> &'static [CheckKind] {
        &[CheckKind::Phrases, CheckKind::Templates]
    }
}
