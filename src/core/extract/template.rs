//! Template reference extraction.
//!
//! Three reference forms are recognized:
//!
//! - `template="forum_view"` (also `template='...'` and `template:...`): the
//!   generic form, whose partition comes from where the file lives
//! - `admin:forum_tools`
//! - `public:forum_view`
//!
//! The generic form is only meaningful inside the generated output
//! directory (`_output/templates/admin/...` or `_output/templates/public/...`).
//! Anywhere else the partition is unknowable and extraction fails.

use std::{path::Path, sync::LazyLock};

use regex::bytes::{Regex, RegexBuilder};

use super::SourceTree;
use crate::core::identifier::is_wildcard;
use crate::core::usage::{Occurrence, TemplateKey, TemplateType, TemplateUsages};
use crate::error::{AuditError, Result};
use crate::utils::LineIndex;

// Group 1: context tag, group 2: identifier.
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"(template|admin|public)(?:="|:|')([a-z0-9_.*]+)['"]?"#)
        .case_insensitive(true)
        .unicode(false)
        .build()
        .unwrap()
});

const GENERIC_TAG: &str = "template";

/// A single template reference found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReference {
    pub key: TemplateKey,
    pub line: usize,
}

impl TemplateReference {
    /// A title ending in `_` is almost always a prefix concatenated with a
    /// runtime value, and should be written as a wildcard.
    pub fn recommends_wildcard(&self) -> bool {
        self.key.title.ends_with('_') && !is_wildcard(&self.key.title)
    }
}

/// Output of the template pass.
#[derive(Debug, Default)]
pub struct TemplateExtraction {
    pub usages: TemplateUsages,
    /// References whose title ends with `_`, kept apart from `usages`.
    pub recommend_wildcard: TemplateUsages,
}

/// Partition implied by a file's location, if it lies in a generated output
/// subtree.
pub fn location_template_type(
    path: &Path,
    addon_dir: &Path,
    output_dir: &str,
) -> Option<TemplateType> {
    let relative = path.strip_prefix(addon_dir).ok()?;
    let output = Path::new(output_dir);

    [TemplateType::Admin, TemplateType::Public]
        .into_iter()
        .find(|t| relative.starts_with(output.join(t.as_str())))
}

/// Template references in `content`.
///
/// `location_type` resolves the generic `template=` form; `None` turns a
/// generic reference into [`AuditError::UnknownTemplateType`] naming `path`.
pub fn template_references(
    content: &[u8],
    path: &Path,
    location_type: Option<TemplateType>,
) -> Result<Vec<TemplateReference>> {
    let lines = LineIndex::new(content);
    let mut references = Vec::new();

    for caps in TEMPLATE_REGEX.captures_iter(content) {
        let (Some(tag), Some(id)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let tag = String::from_utf8_lossy(tag.as_bytes()).to_ascii_lowercase();

        let template_type = if tag == GENERIC_TAG {
            location_type.ok_or_else(|| AuditError::UnknownTemplateType {
                path: path.display().to_string(),
            })?
        } else {
            match tag.parse::<TemplateType>() {
                Ok(t) => t,
                Err(_) => continue,
            }
        };

        references.push(TemplateReference {
            key: TemplateKey::new(template_type, String::from_utf8_lossy(id.as_bytes())),
            line: lines.line_of(id.start()),
        });
    }

    Ok(references)
}

/// Build the template usage indexes for an add-on.
pub fn extract_templates(tree: &SourceTree<'_>, output_dir: &str) -> Result<TemplateExtraction> {
    let per_file = tree.map_files(|path, content| {
        let location_type = location_template_type(path, tree.addon_dir, output_dir);
        let references = template_references(content, path, location_type)?;
        Ok((path.to_path_buf(), references))
    })?;

    let mut extraction = TemplateExtraction::default();
    for (path, references) in per_file {
        for reference in references {
            let target = if reference.recommends_wildcard() {
                &mut extraction.recommend_wildcard
            } else {
                &mut extraction.usages
            };
            target.record(reference.key, Occurrence::new(&path, reference.line));
        }
    }

    tracing::debug!(
        templates = extraction.usages.len(),
        recommend_wildcard = extraction.recommend_wildcard.len(),
        "extracted template references"
    );

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn refs(content: &str, location_type: Option<TemplateType>) -> Vec<(String, usize)> {
        template_references(content.as_bytes(), Path::new("x.html"), location_type)
            .unwrap()
            .into_iter()
            .map(|r| (r.key.to_string(), r.line))
            .collect()
    }

    #[test]
    fn test_tagged_references() {
        let content = r#"<?php
return $this->view('Foo:View', 'public:foo_view', $params);
$reply->setTemplate('admin:foo_tools');
"#;
        assert_eq!(
            refs(content, None),
            vec![
                ("public:foo_view".to_string(), 2),
                ("admin:foo_tools".to_string(), 3)
            ]
        );
    }

    #[test]
    fn test_generic_reference_uses_location_type() {
        let content = r#"<xf:include template="foo_macros" />
<xf:macro template="foo_macros" name="row" />"#;
        assert_eq!(
            refs(content, Some(TemplateType::Admin)),
            vec![
                ("admin:foo_macros".to_string(), 1),
                ("admin:foo_macros".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_generic_reference_outside_output_is_an_error() {
        let err = template_references(
            br#"<xf:include template="foo" />"#,
            Path::new("Setup.php"),
            None,
        )
        .unwrap_err();

        match err {
            AuditError::UnknownTemplateType { path } => assert_eq!(path, "Setup.php"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_uppercase_tag() {
        assert_eq!(
            refs("PUBLIC:Foo_View", None),
            vec![("public:Foo_View".to_string(), 1)]
        );
    }

    #[test]
    fn test_recommends_wildcard() {
        let reference = TemplateReference {
            key: TemplateKey::new(TemplateType::Public, "foo_item_"),
            line: 1,
        };
        assert!(reference.recommends_wildcard());

        let reference = TemplateReference {
            key: TemplateKey::new(TemplateType::Public, "foo_item_*"),
            line: 1,
        };
        assert!(!reference.recommends_wildcard());
    }

    #[test]
    fn test_location_template_type() {
        let addon = Path::new("/addons/Foo");
        let output = "_output/templates";
        assert_eq!(
            location_template_type(&addon.join("_output/templates/admin/a.html"), addon, output),
            Some(TemplateType::Admin)
        );
        assert_eq!(
            location_template_type(&addon.join("_output/templates/public/a.html"), addon, output),
            Some(TemplateType::Public)
        );
        assert_eq!(
            location_template_type(&addon.join("_output/templates/email/a.html"), addon, output),
            None
        );
        assert_eq!(
            location_template_type(&addon.join("Pub/Controller/Foo.php"), addon, output),
            None
        );
    }

    #[test]
    fn test_extract_templates_splits_recommendations() {
        let dir = tempdir().unwrap();
        let addon = dir.path();
        let public_dir = addon.join("_output/templates/public");
        fs::create_dir_all(&public_dir).unwrap();
        fs::write(
            public_dir.join("foo_view.html"),
            "<xf:include template=\"foo_row_\" />\n<xf:include template=\"foo_macros\" />",
        )
        .unwrap();
        fs::write(addon.join("Controller.php"), "'public:foo_view'").unwrap();

        let files = vec![addon.join("Controller.php"), public_dir.join("foo_view.html")];
        let tree = SourceTree {
            addon_dir: addon,
            files: &files,
            data_dir: "_data",
        };

        let extraction = extract_templates(&tree, "_output/templates").unwrap();

        let used: Vec<String> = extraction.usages.keys().map(|k| k.to_string()).collect();
        assert_eq!(used, vec!["public:foo_macros", "public:foo_view"]);

        let recommended = TemplateKey::new(TemplateType::Public, "foo_row_");
        assert_eq!(
            extraction.recommend_wildcard.get(&recommended),
            Some(&[Occurrence::new(public_dir.join("foo_view.html"), 1)][..])
        );
    }
}
