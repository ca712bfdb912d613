//! Common utility functions shared across the codebase.

use std::path::Path;

/// Maps byte offsets in a file to 1-based line numbers.
///
/// Only `\n` counts as a line separator, so `\r\n` files report the same
/// lines as `\n` files.
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &[u8]) -> Self {
        let newlines = content
            .iter()
            .enumerate()
            .filter_map(|(offset, byte)| (*byte == b'\n').then_some(offset))
            .collect();
        Self { newlines }
    }

    /// Line containing `offset`: the number of separators before it, plus one.
    pub fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&newline| newline < offset) + 1
    }
}

/// Render `path` relative to `base` with `/` separators, falling back to the
/// full path when it lies outside `base`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use addon_audit::utils::display_relative;
///
/// assert_eq!(
///     display_relative(Path::new("/srv/xf/src/addons/Foo/Setup.php"), Path::new("/srv/xf")),
///     "src/addons/Foo/Setup.php"
/// );
/// assert_eq!(display_relative(Path::new("/tmp/a.php"), Path::new("/srv")), "/tmp/a.php");
/// ```
pub fn display_relative(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_line_of_first_line() {
        let index = LineIndex::new(b"phrase('a')");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(8), 1);
    }

    #[test]
    fn test_line_of_counts_separators_before_offset() {
        let content = b"one\ntwo\n\nfour";
        let index = LineIndex::new(content);

        assert_eq!(index.line_of(0), 1);
        // The separator itself still belongs to the line it terminates.
        assert_eq!(index.line_of(3), 1);
        assert_eq!(index.line_of(4), 2);
        assert_eq!(index.line_of(9), 4);
        assert_eq!(index.line_of(10), 4);
    }

    #[test]
    fn test_line_of_crlf() {
        let index = LineIndex::new(b"a\r\nb\r\nc");
        assert_eq!(index.line_of(6), 3);
    }

    #[test]
    fn test_display_relative_nested() {
        let base = Path::new("/root/project");
        let path = base.join("src").join("addons").join("Foo").join("a.php");
        assert_eq!(display_relative(&path, base), "src/addons/Foo/a.php");
    }
}
