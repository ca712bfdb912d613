//! Identifier normalization and wildcard matching.
//!
//! Source code refers to assets with plain identifiers (`thread_title`) or
//! wildcard identifiers (`thread_prefix_*`) when the concrete key is built at
//! runtime. A wildcard stands for one or more characters of `[a-z0-9_.]`.

use regex::{Regex, RegexBuilder};

use crate::core::catalog::Titled;
use crate::error::{AuditError, Result};

pub const WILDCARD: char = '*';

/// Replacement for the wildcard token inside a generated pattern.
const WILDCARD_CLASS: &str = "[a-z0-9_.]+";

const ELLIPSIS: &str = "...";

const TRAILING_PUNCTUATION: &[char] = &[',', ':', ')', '('];

/// Strip prose artifacts from a phrase identifier matched in source.
///
/// Removes one trailing ellipsis, or else one trailing `, : ) (`. Never both.
///
/// # Examples
///
/// ```
/// use addon_audit::core::normalize_phrase_id;
///
/// assert_eq!(normalize_phrase_id("loading..."), "loading");
/// assert_eq!(normalize_phrase_id("user_name:"), "user_name");
/// assert_eq!(normalize_phrase_id("user_name"), "user_name");
/// ```
pub fn normalize_phrase_id(raw: &str) -> &str {
    if let Some(stripped) = raw.strip_suffix(ELLIPSIS) {
        return stripped;
    }
    raw.strip_suffix(TRAILING_PUNCTUATION).unwrap_or(raw)
}

pub fn is_wildcard(identifier: &str) -> bool {
    identifier.contains(WILDCARD)
}

/// Matcher for an identifier that may contain a wildcard.
///
/// Without a wildcard the identifier only matches itself. With one, it
/// compiles to an anchored, case-insensitive pattern: `foo_*` matches
/// `foo_bar` but neither `foo_` nor `xfoo_bar`.
#[derive(Debug, Clone)]
pub enum WildcardPattern {
    Exact(String),
    Wildcard { identifier: String, regex: Regex },
}

impl WildcardPattern {
    pub fn new(identifier: &str) -> Result<Self> {
        if !is_wildcard(identifier) {
            return Ok(Self::Exact(identifier.to_string()));
        }

        let body = identifier
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(WILDCARD_CLASS);

        let regex = RegexBuilder::new(&format!("^{}$", body))
            .case_insensitive(true)
            .build()
            .map_err(|source| AuditError::Wildcard {
                identifier: identifier.to_string(),
                source,
            })?;

        Ok(Self::Wildcard {
            identifier: identifier.to_string(),
            regex,
        })
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Exact(identifier) => identifier,
            Self::Wildcard { identifier, .. } => identifier,
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Self::Exact(identifier) => identifier == candidate,
            Self::Wildcard { regex, .. } => regex.is_match(candidate),
        }
    }

    /// First entry, in iteration order, whose title matches.
    ///
    /// When several entries match, the winner depends on the order the
    /// catalog returns them in.
    pub fn first_match<'a, T, I>(&self, entries: I) -> Option<&'a T>
    where
        T: Titled + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        entries
            .into_iter()
            .find(|entry| self.is_match(entry.title()))
    }
}
