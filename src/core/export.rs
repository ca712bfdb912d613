//! Structured export files and the generated template output directory.
//!
//! Each add-on snapshots its assets under `_data/`:
//!
//! ```xml
//! <templates>
//!   <template type="public" title="foo_view" version_id="1" version_string="1.0.0"><![CDATA[...]]></template>
//! </templates>
//! ```
//!
//! Development builds also materialize every template as a file under
//! `_output/templates/<type>/<title>.html`. The two must stay in sync.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use roxmltree::{Document, Node};

use crate::core::usage::{TemplateKey, TemplateType};
use crate::error::{AuditError, Result};

pub const TEMPLATES_FILE_NAME: &str = "templates.xml";
pub const PHRASES_FILE_NAME: &str = "phrases.xml";

/// A template as it appears in `templates.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTemplate {
    pub key: TemplateKey,
    pub content: String,
}

/// Read `templates.xml`. A missing file means the add-on exports no templates.
pub fn load_template_export(path: &Path) -> Result<Vec<ExportedTemplate>> {
    match read_optional(path)? {
        Some(xml) => parse_templates_xml(path, &xml),
        None => {
            tracing::debug!(path = %path.display(), "no template export file");
            Ok(Vec::new())
        }
    }
}

pub fn parse_templates_xml(path: &Path, xml: &str) -> Result<Vec<ExportedTemplate>> {
    let doc = parse_document(path, xml)?;

    let templates = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("template"))
        .map(|node| -> Result<ExportedTemplate> {
            let title = required_attribute(path, node, "title")?;
            let type_attr = required_attribute(path, node, "type")?;
            let template_type =
                type_attr
                    .parse::<TemplateType>()
                    .map_err(|reason| AuditError::ExportEntry {
                        path: path.to_path_buf(),
                        reason,
                    })?;

            Ok(ExportedTemplate {
                key: TemplateKey::new(template_type, title),
                content: text_content(node),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(templates)
}

/// Phrase titles listed in `phrases.xml`. A missing file yields no titles.
pub fn load_phrase_export(path: &Path) -> Result<Vec<String>> {
    let Some(xml) = read_optional(path)? else {
        return Ok(Vec::new());
    };
    let doc = parse_document(path, &xml)?;

    let titles = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("phrase"))
        .map(|node| required_attribute(path, node, "title").map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    Ok(titles)
}

/// Location of a template inside the generated output directory.
///
/// Titles without a `.` get `extension` appended.
pub fn output_template_path(
    addon_dir: &Path,
    output_dir: &str,
    key: &TemplateKey,
    extension: &str,
) -> PathBuf {
    let file_name = if key.title.contains('.') {
        key.title.clone()
    } else {
        format!("{}.{}", key.title, extension)
    };

    addon_dir
        .join(output_dir)
        .join(key.template_type.as_str())
        .join(file_name)
}

/// Contents of a generated template file, or `None` when it does not exist.
pub fn read_output_template(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(AuditError::io(path, source)),
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(xml) => Ok(Some(xml)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(AuditError::io(path, source)),
    }
}

fn parse_document<'x>(path: &Path, xml: &'x str) -> Result<Document<'x>> {
    Document::parse(xml).map_err(|source| AuditError::ExportParse {
        path: path.to_path_buf(),
        source,
    })
}

fn required_attribute<'a>(path: &Path, node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| AuditError::ExportEntry {
        path: path.to_path_buf(),
        reason: format!("<{}> without '{}' attribute", node.tag_name().name(), name),
    })
}

/// Concatenated text and CDATA children of an element.
fn text_content(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}
