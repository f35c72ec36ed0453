//! Path filtering helpers (exclusions, document kinds).

use std::path::Path;

/// How the text of a document is extracted before tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Markup that is flattened to text first.
    Html,
    /// Read as UTF-8 and tokenized directly.
    Text,
}

const HTML_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "adoc", "org", "csv", "tsv", "json", "toml", "yaml", "yml",
    "xml", "rs", "c", "h", "cpp", "hpp", "go", "py", "js", "ts", "java", "rb", "sh", "tex",
];

/// Return `true` if a path should be indexed given the configured exclusions.
///
/// Exclusions are matched against individual path components. Supports:
/// - Exact component matches (`node_modules`)
/// - Simple globs:
///   - `*.ext` (extension match)
///   - `prefix*` (prefix match)
pub fn should_index_path(path: &Path, exclusions: &[String]) -> bool {
    for exclusion in exclusions {
        let exclusion = exclusion.trim_start_matches('/');
        if exclusion.is_empty() {
            continue;
        }

        for component in path.components() {
            let std::path::Component::Normal(component) = component else {
                continue;
            };
            let component_str = component.to_string_lossy();

            if exclusion.contains('*') {
                if let Some(ext) = exclusion.strip_prefix("*.") {
                    if component_str.ends_with(&format!(".{ext}")) {
                        return false;
                    }
                } else if let Some(prefix) = exclusion.strip_suffix('*') {
                    if !prefix.is_empty() && component_str.starts_with(prefix) {
                        return false;
                    }
                }
            } else if component_str == exclusion {
                return false;
            }
        }
    }

    true
}

/// Classify a file by extension, or `None` if its content is not indexable.
pub fn document_kind(path: &Path) -> Option<DocumentKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    if HTML_EXTENSIONS.contains(&ext.as_str()) {
        Some(DocumentKind::Html)
    } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        Some(DocumentKind::Text)
    } else {
        None
    }
}
