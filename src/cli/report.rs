//! Report formatting and printing utilities.
//!
//! Findings are printed grouped by section, one header per non-empty set:
//!
//! ```text
//! Phrases not found:
//!   hello_world
//!     Used in: src/addons/Foo/Pub/Controller/Index.php::10
//! ```
//!
//! Separate from core logic so the library can be used without a terminal.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use super::run::RunResult;
use crate::{
    issues::{Report, ReportItem, ReportSection, Rule, Severity},
    utils::display_relative,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

const FAILURE_MESSAGE: &str = "Please fix all above issues.";

pub fn print(result: &RunResult) {
    report_to(result, &mut io::stdout().lock());
}

/// Print a run's findings to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(result: &RunResult, writer: &mut W) {
    for findings in &result.findings {
        for section in findings.sections() {
            print_section(&section, &result.root_dir, writer);
        }
    }

    if result.is_ok() {
        print_success_to(result.files_checked, writer);
    } else {
        let _ = writeln!(writer, "{}", FAILURE_MESSAGE.bold().red());
    }
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_section<W: Write>(section: &ReportSection, root_dir: &Path, writer: &mut W) {
    let _ = writeln!(writer, "{}", section.heading.bold());

    for item in &section.items {
        let _ = writeln!(writer, "  {}", label(section.rule, item));
        for occurrence in &item.occurrences {
            let _ = writeln!(
                writer,
                "    {} {}",
                "Used in:".yellow(),
                format!(
                    "{}::{}",
                    display_relative(&occurrence.file_path, root_dir),
                    occurrence.line
                )
                .green()
            );
        }
    }

    let _ = writeln!(writer);
}

fn label(rule: Rule, item: &ReportItem) -> colored::ColoredString {
    match (rule, rule.severity()) {
        (Rule::Shared, _) => item.label.green(),
        (_, Severity::Error) => item.label.white().on_red(),
        (_, Severity::Warning) => item.label.yellow(),
    }
}
