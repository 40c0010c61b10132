//! Markdown parsing through comrak, converted into the owned node tree.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options};

use crate::anchor::AnchorRegistry;
use crate::front_matter::front_matter_end;
use crate::node::{Node, NodeKind};

/// Parser switches.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Skip a leading `---` front-matter block.
    pub front_matter: bool,
    /// Give every heading a unique anchor id.
    pub auto_heading_ids: bool,
    /// Heading texts anchored before the document's own headings, as if they
    /// preceded it.
    pub reserved_ids: Vec<String>,
}

/// A parsed tree together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub root: Node,
    pub source: String,
}

/// Parse Markdown into a document tree.
///
/// Never fails: CommonMark has no invalid input. Invalid UTF-8 is replaced
/// lossily.
pub fn parse(source: impl Into<Vec<u8>>, options: &ParseOptions) -> ParsedDocument {
    let text = match String::from_utf8(source.into()) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };

    let body_start = if options.front_matter {
        front_matter_end(&text).unwrap_or(0)
    } else {
        0
    };

    let arena = Arena::new();
    let ast = comrak::parse_document(&arena, &text[body_start..], &Options::default());
    let mut root = Node::document(convert_children(ast));

    if options.auto_heading_ids {
        let mut registry = AnchorRegistry::new();
        for reserved in &options.reserved_ids {
            registry.assign(reserved);
        }
        assign_heading_ids(&mut root, &mut registry);
    }

    tracing::trace!(blocks = root.children.len(), bytes = text.len(), "parsed markdown");
    ParsedDocument { root, source: text }
}

/// Assign anchors to every heading under `node`, in document order.
pub fn assign_heading_ids(node: &mut Node, registry: &mut AnchorRegistry) {
    if node.is_heading() {
        let anchor = registry.assign(&node.plain_text());
        if let NodeKind::Heading { id, .. } = &mut node.kind {
            *id = Some(anchor);
        }
    }
    for child in &mut node.children {
        assign_heading_ids(child, registry);
    }
}

fn convert_children<'a>(parent: &'a AstNode<'a>) -> Vec<Node> {
    parent.children().filter_map(convert).collect()
}

fn convert<'a>(ast: &'a AstNode<'a>) -> Option<Node> {
    let kind = match &ast.data.borrow().value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::Heading(heading) => NodeKind::Heading {
            level: heading.level,
            id: None,
        },
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::List(list) => NodeKind::List {
            ordered: list.list_type == ListType::Ordered,
            start: list.start,
            tight: list.tight,
        },
        NodeValue::Item(_) => NodeKind::ListItem,
        NodeValue::BlockQuote => NodeKind::BlockQuote,
        NodeValue::CodeBlock(code) => NodeKind::CodeBlock {
            info: code.info.split_whitespace().next().map(str::to_string),
            literal: code.literal.clone(),
        },
        NodeValue::HtmlBlock(html) => NodeKind::HtmlBlock(html.literal.clone()),
        NodeValue::ThematicBreak => NodeKind::ThematicBreak,
        NodeValue::Text(text) => NodeKind::Text(text.clone()),
        NodeValue::Code(code) => NodeKind::Code(code.literal.clone()),
        NodeValue::Emph => NodeKind::Emphasis,
        NodeValue::Strong => NodeKind::Strong,
        NodeValue::Link(link) => NodeKind::Link {
            destination: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::Image(link) => NodeKind::Image {
            destination: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::HtmlInline(html) => NodeKind::HtmlInline(html.clone()),
        NodeValue::SoftBreak => NodeKind::SoftBreak,
        NodeValue::LineBreak => NodeKind::LineBreak,
        // Extensions are off; front matter is stripped before parsing.
        _ => return None,
    };
    Some(Node::new(kind, convert_children(ast)))
}
