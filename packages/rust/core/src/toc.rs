//! Table of contents generation.
//!
//! Re-parses the serialized composite with heading anchors enabled, then
//! prepends a title heading and a nested link list mirroring every heading.

use tracing::{debug, instrument};

use markdown_index_markdown::{Node, NodeKind, ParseOptions, ParsedDocument, parse, slugify, walk};
use markdown_index_shared::{DEFAULT_TOC_TITLE, MarkdownIndexError, Result};

/// Options for [`build_toc`].
#[derive(Debug, Clone)]
pub struct TocOptions {
    /// Text of the heading placed above the list.
    pub title: String,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TOC_TITLE.to_string(),
        }
    }
}

/// One navigation entry and the entries nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
    pub children: Vec<TocEntry>,
}

/// Parse `composite` and prepend its table of contents.
///
/// The title is anchored before the composite's headings, so no entry can
/// collide with it and the anchors match the ids of rendered HTML headings.
#[instrument(skip_all, fields(bytes = composite.len()))]
pub fn build_toc(composite: &[u8], options: &TocOptions) -> Result<ParsedDocument> {
    let title = options.title.trim();
    if title.is_empty() {
        return Err(MarkdownIndexError::validation(
            "table of contents title must not be empty",
        ));
    }

    let title_anchor = slugify(title);
    let mut doc = parse(
        composite,
        &ParseOptions {
            front_matter: false,
            auto_heading_ids: true,
            reserved_ids: vec![title.to_string()],
        },
    );

    let entries = collect_entries(&doc);
    debug!(entries = entries.len(), "collected table of contents entries");

    let mut children = Vec::with_capacity(doc.root.children.len() + 2);
    let mut heading = Node::heading(1, title);
    heading.kind = NodeKind::Heading {
        level: 1,
        id: Some(title_anchor),
    };
    children.push(heading);
    if !entries.is_empty() {
        children.push(entry_list(&entries));
    }
    children.append(&mut doc.root.children);
    doc.root.children = children;

    Ok(doc)
}

/// Headings of `doc` nested by level: each entry goes under the nearest
/// preceding entry with a lower level.
pub fn collect_entries(doc: &ParsedDocument) -> Vec<TocEntry> {
    let mut roots = Vec::new();

    let _ = walk(&doc.root.children, &mut |node, _, _| {
        if let NodeKind::Heading { level, id } = &node.kind {
            let title = node.plain_text();
            let anchor = id.clone().unwrap_or_else(|| slugify(&title));
            insert(
                &mut roots,
                TocEntry {
                    level: *level,
                    title,
                    anchor,
                    children: Vec::new(),
                },
            );
        }
        std::ops::ControlFlow::<()>::Continue(())
    });

    roots
}

fn insert(siblings: &mut Vec<TocEntry>, entry: TocEntry) {
    match siblings.last_mut() {
        Some(last) if last.level < entry.level => insert(&mut last.children, entry),
        _ => siblings.push(entry),
    }
}

/// Tight bullet list of links, nested like the entries.
fn entry_list(entries: &[TocEntry]) -> Node {
    let items = entries
        .iter()
        .map(|entry| {
            let link = Node::link(format!("#{}", entry.anchor), entry.title.as_str());
            let mut content = vec![Node::new(NodeKind::Paragraph, vec![link])];
            if !entry.children.is_empty() {
                content.push(entry_list(&entry.children));
            }
            Node::new(NodeKind::ListItem, content)
        })
        .collect();

    Node::new(
        NodeKind::List {
            ordered: false,
            start: 1,
            tight: true,
        },
        items,
    )
}
