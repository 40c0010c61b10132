//! Document tree: tagged node kinds, owned text leaves, and traversal.

use std::ops::ControlFlow;

/// Kind of a tree node.
///
/// Block kinds come first, then inline kinds. Leaves (`Text`, `Code`,
/// `HtmlInline`, breaks, code and HTML blocks) own their content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading { level: u8, id: Option<String> },
    Paragraph,
    List { ordered: bool, start: usize, tight: bool },
    ListItem,
    BlockQuote,
    CodeBlock { info: Option<String>, literal: String },
    HtmlBlock(String),
    ThematicBreak,
    Text(String),
    Code(String),
    Emphasis,
    Strong,
    Link { destination: String, title: String },
    Image { destination: String, title: String },
    HtmlInline(String),
    SoftBreak,
    LineBreak,
}

impl NodeKind {
    /// Whether nodes of this kind sit in inline content.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Text(_)
                | Self::Code(_)
                | Self::Emphasis
                | Self::Strong
                | Self::Link { .. }
                | Self::Image { .. }
                | Self::HtmlInline(_)
                | Self::SoftBreak
                | Self::LineBreak
        )
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Document, children)
    }

    /// A heading with a single text child.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(
            NodeKind::Heading { level, id: None },
            vec![Self::text_leaf(text)],
        )
    }

    /// A paragraph holding `text`, one text leaf per line with soft breaks
    /// between them. Lines are trimmed and blank lines dropped.
    pub fn paragraph(text: &str) -> Self {
        Self::new(NodeKind::Paragraph, Self::lines(text))
    }

    /// Inline nodes for multi-line plain text.
    pub fn lines(text: &str) -> Vec<Node> {
        let mut inlines = Vec::new();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if !inlines.is_empty() {
                inlines.push(Self::new(NodeKind::SoftBreak, Vec::new()));
            }
            inlines.push(Self::text_leaf(line));
        }
        inlines
    }

    pub fn text_leaf(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()), Vec::new())
    }

    pub fn link(destination: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            NodeKind::Link {
                destination: destination.into(),
                title: String::new(),
            },
            vec![Self::text_leaf(text)],
        )
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, NodeKind::Heading { .. })
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    pub fn heading_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Heading { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    /// Text of this node as prose.
    ///
    /// Inline children are concatenated and line breaks become `\n`; sibling
    /// blocks are joined with `\n`. Code blocks, HTML and thematic breaks
    /// contribute nothing at any depth.
    pub fn text(&self) -> String {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::Code(text) => text.clone(),
            NodeKind::SoftBreak | NodeKind::LineBreak => "\n".to_string(),
            NodeKind::CodeBlock { .. }
            | NodeKind::HtmlBlock(_)
            | NodeKind::HtmlInline(_)
            | NodeKind::ThematicBreak => String::new(),
            kind if kind.is_inline() => self.children.iter().map(Node::text).collect(),
            _ if self.children.first().is_some_and(|c| c.kind.is_inline()) => {
                self.children.iter().map(Node::text).collect()
            }
            _ => self
                .children
                .iter()
                .map(Node::text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Single-line text used for headings and anchors: text and code literals,
    /// with line breaks as spaces.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain(&mut out);
        out
    }

    fn collect_plain(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::Code(text) => out.push_str(text),
            NodeKind::SoftBreak | NodeKind::LineBreak => out.push(' '),
            _ => {
                for child in &self.children {
                    child.collect_plain(out);
                }
            }
        }
    }
}

/// Pre-order walk over `nodes` and their descendants.
///
/// The visitor receives each node together with the sibling slice it lives in
/// and its index there, so it can look at the next sibling. Returning
/// `ControlFlow::Break` stops the whole walk.
pub fn walk<'a, B>(
    nodes: &'a [Node],
    visit: &mut impl FnMut(&'a Node, &'a [Node], usize) -> ControlFlow<B>,
) -> ControlFlow<B> {
    for (index, node) in nodes.iter().enumerate() {
        visit(node, nodes, index)?;
        walk(&node.children, visit)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(children: Vec<Node>) -> Node {
        Node::new(NodeKind::ListItem, children)
    }

    #[test]
    fn paragraph_lines_become_soft_breaks() {
        let para = Node::paragraph("  first line\n\n second line  \n");
        assert_eq!(para.children.len(), 3);
        assert_eq!(para.children[1].kind, NodeKind::SoftBreak);
        assert_eq!(para.text(), "first line\nsecond line");
    }

    #[test]
    fn text_of_link_concatenates() {
        let link = Node::new(
            NodeKind::Link {
                destination: "#x".into(),
                title: String::new(),
            },
            vec![
                Node::text_leaf("Getting"),
                Node::new(NodeKind::Strong, vec![Node::text_leaf(" Started")]),
            ],
        );
        assert_eq!(link.text(), "Getting Started");
    }

    #[test]
    fn text_skips_code_and_html_at_any_depth() {
        let list = Node::new(
            NodeKind::List {
                ordered: false,
                start: 1,
                tight: true,
            },
            vec![
                item(vec![Node::paragraph("one")]),
                item(vec![
                    Node::paragraph("two"),
                    Node::new(
                        NodeKind::CodeBlock {
                            info: None,
                            literal: "# comment\n".into(),
                        },
                        Vec::new(),
                    ),
                ]),
                item(vec![Node::new(NodeKind::HtmlBlock("<div>".into()), Vec::new())]),
            ],
        );
        assert_eq!(list.text(), "one\ntwo");
    }

    #[test]
    fn plain_text_flattens_markup_and_breaks() {
        let heading = Node::new(
            NodeKind::Heading { level: 1, id: None },
            vec![
                Node::new(NodeKind::Emphasis, vec![Node::text_leaf("Setext")]),
                Node::new(NodeKind::SoftBreak, Vec::new()),
                Node::new(NodeKind::Code("title".into()), Vec::new()),
            ],
        );
        assert_eq!(heading.plain_text(), "Setext title");
    }

    #[test]
    fn walk_is_preorder_and_stops_early() {
        let tree = vec![
            Node::heading(1, "A"),
            Node::new(NodeKind::BlockQuote, vec![Node::heading(2, "B")]),
            Node::heading(1, "C"),
        ];

        let mut seen = Vec::new();
        let flow = walk(&tree, &mut |node, _, _| {
            if let NodeKind::Heading { .. } = node.kind {
                let text = node.plain_text();
                seen.push(text.clone());
                if text == "B" {
                    return ControlFlow::Break(text);
                }
            }
            ControlFlow::Continue(())
        });

        assert_eq!(flow, ControlFlow::Break("B".to_string()));
        assert_eq!(seen, vec!["A", "B"]);
    }

    #[test]
    fn walk_exposes_next_sibling() {
        let tree = vec![Node::heading(1, "Title"), Node::paragraph("Body")];
        let mut next = None;
        let _ = walk(&tree, &mut |node, siblings, index| {
            if node.is_heading() {
                next = siblings.get(index + 1).map(Node::text);
            }
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(next.as_deref(), Some("Body"));
    }
}
