//! Phrase reference extraction.
//!
//! Recognizes call-like references in any file kind:
//!
//! - PHP: `\XF::phrase('thread_title')`, `$this->phrase("save")`
//! - Templates: `{{ phrase('option.board_title') }}`
//! - JavaScript: `XF.phrase('loading...')`

use std::sync::LazyLock;

use regex::bytes::{Regex, RegexBuilder};

use super::SourceTree;
use crate::core::identifier::normalize_phrase_id;
use crate::core::usage::{Occurrence, PhraseUsages};
use crate::error::Result;
use crate::utils::LineIndex;

// Group 1 is the identifier. A trailing `.`, `,` or `:` is allowed before the
// closing quote so prose such as phrase('name:') still resolves.
static PHRASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"(?:xf::)?phrase\(['"]([a-z0-9._*]+)[.,:]?['"]?"#)
        .case_insensitive(true)
        .unicode(false)
        .build()
        .unwrap()
});

/// Phrase identifiers referenced in `content`, normalized, with their lines.
pub fn phrase_references(content: &[u8]) -> Vec<(String, usize)> {
    let lines = LineIndex::new(content);

    PHRASE_REGEX
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let raw = String::from_utf8_lossy(m.as_bytes());
            let id = normalize_phrase_id(&raw).to_string();
            (id, lines.line_of(m.start()))
        })
        .filter(|(id, _)| !id.is_empty())
        .collect()
}

/// Build the phrase usage index for an add-on.
pub fn extract_phrases(tree: &SourceTree<'_>) -> Result<PhraseUsages> {
    let per_file = tree.map_files(|path, content| {
        Ok(phrase_references(content)
            .into_iter()
            .map(|(id, line)| (id, Occurrence::new(path, line)))
            .collect::<Vec<_>>())
    })?;

    let usages: PhraseUsages = per_file.into_iter().flatten().collect();
    tracing::debug!(
        phrases = usages.len(),
        occurrences = usages.occurrence_count(),
        "extracted phrase references"
    );

    Ok(usages)
}
