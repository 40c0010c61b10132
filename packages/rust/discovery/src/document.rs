//! Loaded source documents and path helpers.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use markdown_index_markdown::{ParseOptions, ParsedDocument, extract_front_matter, parse};
use markdown_index_shared::{GENERATED_BY_KEY, GENERATED_BY_VALUE, MarkdownIndexError, Result};

/// A discovered `.md` file, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path as produced by the walk (prefixed by the scan root).
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative_path: String,
    /// Raw file content.
    pub content: Vec<u8>,
    /// Directory depth relative to the scan root, at least 1.
    pub depth: usize,
    /// Scalar front-matter fields; empty when there is no front matter.
    pub metadata: BTreeMap<String, String>,
}

impl SourceDocument {
    /// Whether the file carries the generation marker.
    pub fn is_generated(&self) -> bool {
        self.metadata.get(GENERATED_BY_KEY).map(String::as_str) == Some(GENERATED_BY_VALUE)
    }

    /// Parse the document body, skipping front matter.
    pub fn parse(&self) -> ParsedDocument {
        parse(
            self.content.clone(),
            &ParseOptions {
                front_matter: true,
                ..Default::default()
            },
        )
    }
}

/// Read `path` and derive its metadata. `root` is the scan root it was found under.
pub fn load_document(root: &Path, path: &Path) -> Result<SourceDocument> {
    let content = std::fs::read(path).map_err(|e| MarkdownIndexError::io(path, e))?;
    let metadata = extract_front_matter(&content)
        .map(|fm| fm.fields)
        .unwrap_or_default();

    Ok(SourceDocument {
        path: path.to_path_buf(),
        relative_path: relative_display_path(root, path),
        content,
        depth: path_depth(root, path),
        metadata,
    })
}

fn relative_components<'a>(root: &Path, file: &'a Path) -> Vec<Component<'a>> {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// Number of path components of `file` below `root`: `root/c.md` is 1,
/// `root/a/c.md` is 2. Never less than 1.
pub fn path_depth(root: &Path, file: &Path) -> usize {
    relative_components(root, file).len().max(1)
}

/// `file` relative to `root`, joined with `/` on every platform.
pub fn relative_display_path(root: &Path, file: &Path) -> String {
    relative_components(root, file)
        .iter()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
