//! Core domain types shared across the markdown-index crates.

use serde::{Deserialize, Serialize};

/// Extension (without the dot) of the documents the indexer reads.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Front-matter key that marks a file as produced by this tool.
pub const GENERATED_BY_KEY: &str = "generated-by";

/// Value stored under [`GENERATED_BY_KEY`].
pub const GENERATED_BY_VALUE: &str = "markdown-index";

/// Front-matter block prepended to marked output files.
pub const GENERATION_MARKER: &str = "---\ngenerated-by: markdown-index\n---\n";

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// Output form of the generated index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured Markdown text.
    #[default]
    Markdown,
    /// HTML fragment.
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

// ---------------------------------------------------------------------------
// Abstract
// ---------------------------------------------------------------------------

/// The summary pair extracted from one document.
///
/// The absent state is `Option::<Abstract>::None`; a present abstract may
/// still carry an empty body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abstract {
    /// Heading text, without the `#` prefix.
    pub title: String,
    /// Text of the node following the heading.
    pub body: String,
}

impl Abstract {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
