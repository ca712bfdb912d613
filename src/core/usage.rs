//! Usage types produced by the extraction phase.
//!
//! A [`UsageIndex`] maps every referenced identifier to the places it was
//! referenced from. Rules consume it to classify each identifier against the
//! catalog.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, btree_map},
    fmt,
    path::PathBuf,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// A single reference to an asset: the file it appears in and its 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub file_path: PathBuf,
    pub line: usize,
}

impl Occurrence {
    pub fn new(file_path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// Template partition.
///
/// Source references only ever name `admin` or `public`; `email` templates
/// still appear in exports and generated output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Admin,
    Public,
    Email,
}

impl TemplateType {
    pub const ALL: [TemplateType; 3] = [
        TemplateType::Admin,
        TemplateType::Public,
        TemplateType::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Admin => "admin",
            TemplateType::Public => "public",
            TemplateType::Email => "email",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateType::ALL
            .into_iter()
            .find(|t| s.eq_ignore_ascii_case(t.as_str()))
            .ok_or_else(|| format!("unknown template type '{}'", s))
    }
}

/// Template identity: partition plus title. Displayed as `type:title`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateKey {
    pub template_type: TemplateType,
    pub title: String,
}

impl TemplateKey {
    pub fn new(template_type: TemplateType, title: impl Into<String>) -> Self {
        Self {
            template_type,
            title: title.into(),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.template_type, self.title)
    }
}

/// Identifier -> occurrences, accumulated over a whole scan.
///
/// Occurrences keep the order they were recorded in; identifiers iterate in
/// sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageIndex<K: Ord = String> {
    entries: BTreeMap<K, Vec<Occurrence>>,
}

impl<K: Ord> Default for UsageIndex<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord> UsageIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: K, occurrence: Occurrence) {
        self.entries.entry(key).or_default().push(occurrence);
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[Occurrence]>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Occurrence])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of occurrences across all identifiers.
    pub fn occurrence_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<K: Ord> FromIterator<(K, Occurrence)> for UsageIndex<K> {
    fn from_iter<I: IntoIterator<Item = (K, Occurrence)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, occurrence) in iter {
            index.record(key, occurrence);
        }
        index
    }
}

impl<K: Ord> Extend<(K, Occurrence)> for UsageIndex<K> {
    fn extend<I: IntoIterator<Item = (K, Occurrence)>>(&mut self, iter: I) {
        for (key, occurrence) in iter {
            self.record(key, occurrence);
        }
    }
}

impl<K: Ord> IntoIterator for UsageIndex<K> {
    type Item = (K, Vec<Occurrence>);
    type IntoIter = btree_map::IntoIter<K, Vec<Occurrence>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

pub type PhraseUsages = UsageIndex<String>;
pub type TemplateUsages = UsageIndex<TemplateKey>;
