//! Composite document assembly.
//!
//! Turns the per-file abstracts into one tree: a heading whose level is the
//! file's directory depth, followed by the abstract body and a link back to
//! the original file.

use tracing::{debug, instrument};

use markdown_index_discovery::SourceDocument;
use markdown_index_markdown::{Node, NodeKind, render_markdown};
use markdown_index_shared::{Abstract, Result};

use crate::extract::{ExtractOptions, extract};

/// Label of the back-link appended to every body.
pub const READ_MORE_LABEL: &str = "Read more on the original file...";

/// Deepest heading level Markdown can express.
const MAX_HEADING_LEVEL: usize = 6;

/// One discovered file reduced to what the composite needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to the scan root, `/`-separated.
    pub relative_path: String,
    /// Directory depth relative to the scan root.
    pub depth: usize,
    /// Extracted abstract, if the file has a heading.
    pub summary: Option<Abstract>,
}

impl IndexEntry {
    /// Parse `document` and extract its abstract.
    pub fn from_document(document: &SourceDocument, options: &ExtractOptions<'_>) -> Self {
        let parsed = document.parse();
        let summary = extract(&parsed.root, options);
        if summary.is_none() {
            debug!(path = %document.relative_path, "no heading found, using path as title");
        }

        Self {
            relative_path: document.relative_path.clone(),
            depth: document.depth,
            summary,
        }
    }

    /// Heading level for this entry: the depth, clamped to 1..=6.
    pub fn heading_level(&self) -> u8 {
        self.depth.clamp(1, MAX_HEADING_LEVEL) as u8
    }
}

/// The assembled heading/body pairs, in discovery order.
///
/// Each body is a paragraph holding the abstract text followed by the
/// back-link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeDocument {
    root: Node,
}

impl CompositeDocument {
    /// Top-level nodes: heading, body, heading, body, …
    pub fn nodes(&self) -> &[Node] {
        &self.root.children
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Serialize to Markdown.
    ///
    /// A body is written as its abstract text, a blank line, then the
    /// back-link. Abstract text is escaped, so it cannot add headings or other
    /// blocks when the output is parsed again.
    pub fn to_markdown(&self) -> Result<String> {
        let mut blocks = Vec::with_capacity(self.root.children.len() * 3 / 2);
        for node in self.nodes() {
            match node.kind {
                NodeKind::Paragraph => blocks.extend(split_back_link(node)),
                _ => blocks.push(node.clone()),
            }
        }
        render_markdown(&Node::document(blocks))
    }
}

/// The body text (if any) and the back-link as separate paragraphs.
fn split_back_link(body: &Node) -> Vec<Node> {
    let (links, text): (Vec<Node>, Vec<Node>) = body
        .children
        .iter()
        .cloned()
        .partition(|child| matches!(child.kind, NodeKind::Link { .. }));

    let mut blocks = Vec::with_capacity(2);
    if !text.is_empty() {
        blocks.push(Node::new(NodeKind::Paragraph, text));
    }
    blocks.push(Node::new(NodeKind::Paragraph, links));
    blocks
}

/// Build the composite document: two nodes per entry, no reordering.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn assemble(entries: &[IndexEntry]) -> CompositeDocument {
    let mut children = Vec::with_capacity(entries.len() * 2);

    for entry in entries {
        let (title, body) = match &entry.summary {
            Some(summary) => (summary.title.as_str(), summary.body.as_str()),
            None => (entry.relative_path.as_str(), ""),
        };

        let mut body = Node::lines(body);
        body.push(Node::link(link_destination(&entry.relative_path), READ_MORE_LABEL));

        children.push(Node::heading(entry.heading_level(), title));
        children.push(Node::new(NodeKind::Paragraph, body));
    }

    CompositeDocument {
        root: Node::document(children),
    }
}

/// Percent-encode whitespace so the path stays a single link destination.
fn link_destination(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '\t' => out.push_str("%09"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use markdown_index_markdown::{ParseOptions, parse};

    use super::*;

    fn entry(path: &str, depth: usize, summary: Option<(&str, &str)>) -> IndexEntry {
        IndexEntry {
            relative_path: path.into(),
            depth,
            summary: summary.map(|(t, b)| Abstract::new(t, b)),
        }
    }

    /// `(heading level, heading text)` or `(None, body text, link destination)`.
    fn describe(doc: &CompositeDocument) -> Vec<(Option<u8>, String, Option<String>)> {
        doc.nodes()
            .iter()
            .map(|n| match n.heading_level() {
                Some(level) => (Some(level), n.plain_text(), None),
                None => {
                    let (text, link) = n.children.split_at(n.children.len() - 1);
                    let text = Node::new(NodeKind::Paragraph, text.to_vec()).text();
                    let destination = match &link[0].kind {
                        NodeKind::Link { destination, .. } => Some(destination.clone()),
                        _ => None,
                    };
                    (None, text, destination)
                }
            })
            .collect()
    }

    #[test]
    fn two_documents_example() {
        let doc = assemble(&[
            entry("README.md", 1, Some(("Intro", "Hello"))),
            entry("docs/Guide.md", 2, Some(("Guide", "Details"))),
        ]);

        assert_eq!(
            describe(&doc),
            vec![
                (Some(1), "Intro".to_string(), None),
                (None, "Hello".to_string(), Some("README.md".to_string())),
                (Some(2), "Guide".to_string(), None),
                (None, "Details".to_string(), Some("docs/Guide.md".to_string())),
            ]
        );
        assert!(matches!(doc.nodes()[1].kind, NodeKind::Paragraph));
        assert_eq!(doc.nodes()[1].children[1].plain_text(), READ_MORE_LABEL);
    }

    #[test]
    fn empty_input_gives_empty_composite() {
        let doc = assemble(&[]);
        assert!(doc.is_empty());
        assert_eq!(doc.to_markdown().unwrap(), "");
    }

    #[test]
    fn absent_abstract_falls_back_to_path() {
        let doc = assemble(&[entry("notes/todo.md", 2, None)]);
        assert_eq!(
            describe(&doc),
            vec![
                (Some(2), "notes/todo.md".to_string(), None),
                (None, String::new(), Some("notes/todo.md".to_string())),
            ]
        );
        assert_eq!(
            doc.to_markdown().unwrap(),
            "## notes/todo.md\n\n[Read more on the original file...](notes/todo.md)\n"
        );
    }

    #[test]
    fn depth_is_clamped_to_heading_range() {
        assert_eq!(entry("a.md", 0, None).heading_level(), 1);
        assert_eq!(entry("a/b/c/d/e/f/g/h.md", 8, None).heading_level(), 6);
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let doc = assemble(&[
            entry("b.md", 1, Some(("Same", ""))),
            entry("a.md", 1, Some(("Same", ""))),
        ]);
        let described = describe(&doc);
        assert_eq!(described.len(), 4);
        assert_eq!(described[0].1, "Same");
        assert_eq!(described[2].1, "Same");
        assert_eq!(described[1].2.as_deref(), Some("b.md"));
        assert_eq!(described[3].2.as_deref(), Some("a.md"));
    }

    #[test]
    fn paths_with_spaces_are_encoded() {
        let doc = assemble(&[entry("My Notes/a b.md", 2, Some(("T", "")))]);
        assert_eq!(describe(&doc)[1].2.as_deref(), Some("My%20Notes/a%20b.md"));
    }

    #[test]
    fn markdown_serialization() {
        let doc = assemble(&[
            entry("README.md", 1, Some(("Intro", "Hello"))),
            entry("docs/Guide.md", 2, Some(("Guide", "Details"))),
        ]);
        assert_eq!(
            doc.to_markdown().unwrap(),
            "# Intro\n\nHello\n\n[Read more on the original file...](README.md)\n\n\
             ## Guide\n\nDetails\n\n[Read more on the original file...](docs/Guide.md)\n"
        );
    }

    #[test]
    fn block_syntax_in_bodies_stays_inside_the_body() {
        let doc = assemble(&[
            entry("a.md", 1, Some(("Title", "a\n==="))),
            entry("b.md", 1, Some(("B", "Hello\n# not a heading\n- item\n```"))),
        ]);
        let reparsed = parse(doc.to_markdown().unwrap(), &ParseOptions::default());

        let headings: Vec<_> = reparsed
            .root
            .children
            .iter()
            .filter(|n| n.is_heading())
            .map(Node::plain_text)
            .collect();
        assert_eq!(headings, vec!["Title", "B"]);
        assert_eq!(
            reparsed.root.children[4].text(),
            "Hello\n# not a heading\n- item\n```"
        );
    }
}
