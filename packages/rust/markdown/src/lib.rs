//! Markdown document model for markdown-index.
//!
//! Parsing and formatting are done by comrak. This crate converts its arena
//! AST into an owned tree of tagged nodes that the rest of the workspace can
//! walk, build and hand back for rendering as CommonMark or HTML.

mod anchor;
mod front_matter;
mod node;
mod parser;
mod render;

use markdown_index_shared::{OutputFormat, Result};

pub use anchor::{AnchorRegistry, slugify};
pub use front_matter::{FrontMatter, extract_front_matter, front_matter_end};
pub use node::{Node, NodeKind, walk};
pub use parser::{ParseOptions, ParsedDocument, assign_heading_ids, parse};
pub use render::{render_html, render_markdown};

impl ParsedDocument {
    /// Render this document in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Markdown => render_markdown(&self.root),
            OutputFormat::Html => render_html(&self.root),
        }
    }

    /// Headings in document order as `(level, text)`.
    pub fn headings(&self) -> Vec<(u8, String)> {
        let mut headings = Vec::new();
        let _ = walk(&self.root.children, &mut |node, _, _| {
            if let Some(level) = node.heading_level() {
                headings.push((level, node.plain_text()));
            }
            std::ops::ControlFlow::<()>::Continue(())
        });
        headings
    }
}
