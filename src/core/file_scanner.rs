use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::utils::display_relative;

/// Result of scanning files.
pub struct ScanResult {
    /// Regular files under the root, sorted by path.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect every regular file under `root`, at any depth.
///
/// `ignore_patterns` are globs matched against the path relative to `root`.
/// A root that does not exist yields no files.
pub fn scan_files(root: &Path, ignore_patterns: &[String]) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => glob_patterns.push(pattern),
            Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
        }
    }

    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "scan root is not a directory");
        return ScanResult {
            files,
            skipped_count,
        };
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();

        if !glob_patterns.is_empty() {
            let relative = display_relative(path, root);
            if glob_patterns.iter().any(|p| p.matches(&relative)) {
                continue;
            }
        }

        if path.is_file() {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}
