//! Rendering: the node tree is rebuilt as a comrak AST and formatted as
//! CommonMark or HTML.

use std::cell::RefCell;

use comrak::nodes::{
    Ast, AstNode, LineColumn, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading,
    NodeHtmlBlock, NodeLink, NodeList, NodeValue,
};
use comrak::{Arena, Options};

use markdown_index_shared::{MarkdownIndexError, Result};

use crate::node::{Node, NodeKind};

/// HTML block type used for raw blocks we rebuild (CommonMark type 6).
const HTML_BLOCK_TYPE: u8 = 6;

/// Serialize a tree as CommonMark.
///
/// Text leaves are escaped, so plain text never turns into block syntax when
/// the output is parsed again.
pub fn render_markdown(root: &Node) -> Result<String> {
    let arena = Arena::new();
    let ast = build(&arena, root, None)?;

    let mut out = Vec::new();
    comrak::format_commonmark(ast, &Options::default(), &mut out)
        .map_err(|e| MarkdownIndexError::render(format!("commonmark output: {e}")))?;
    into_string(out)
}

/// Render a tree as an HTML fragment.
///
/// Every heading carries an anchor element whose `id` follows the document's
/// heading order, matching the anchors from `AnchorRegistry`.
pub fn render_html(root: &Node) -> Result<String> {
    let arena = Arena::new();
    let ast = build(&arena, root, None)?;

    let mut options = Options::default();
    options.extension.header_ids = Some(String::new());

    let mut out = Vec::new();
    comrak::format_html(ast, &options, &mut out)
        .map_err(|e| MarkdownIndexError::render(format!("html output: {e}")))?;
    into_string(out)
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| MarkdownIndexError::render(e.to_string()))
}

/// Rebuild `node` and its subtree in `arena`. List items take the list's
/// settings from `list`.
fn build<'a>(
    arena: &'a Arena<AstNode<'a>>,
    node: &Node,
    list: Option<NodeList>,
) -> Result<&'a AstNode<'a>> {
    let mut child_list = None;

    let value = match &node.kind {
        NodeKind::Document => NodeValue::Document,
        NodeKind::Heading { level, .. } => {
            if !(1..=6).contains(level) {
                return Err(MarkdownIndexError::render(format!(
                    "heading level {level} outside 1..=6"
                )));
            }
            NodeValue::Heading(NodeHeading {
                level: *level,
                ..NodeHeading::default()
            })
        }
        NodeKind::Paragraph => NodeValue::Paragraph,
        NodeKind::List {
            ordered,
            start,
            tight,
        } => {
            let settings = NodeList {
                list_type: if *ordered {
                    ListType::Ordered
                } else {
                    ListType::Bullet
                },
                start: *start,
                tight: *tight,
                delimiter: ListDelimType::Period,
                bullet_char: b'-',
                ..NodeList::default()
            };
            child_list = Some(settings);
            NodeValue::List(settings)
        }
        NodeKind::ListItem => {
            let settings = list.ok_or_else(|| {
                MarkdownIndexError::render("list item outside of a list")
            })?;
            NodeValue::Item(settings)
        }
        NodeKind::BlockQuote => NodeValue::BlockQuote,
        NodeKind::CodeBlock { info, literal } => NodeValue::CodeBlock(NodeCodeBlock {
            fenced: true,
            fence_char: b'`',
            fence_length: 3,
            info: info.clone().unwrap_or_default(),
            literal: literal.clone(),
            ..NodeCodeBlock::default()
        }),
        NodeKind::HtmlBlock(literal) => NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: HTML_BLOCK_TYPE,
            literal: literal.clone(),
        }),
        NodeKind::ThematicBreak => NodeValue::ThematicBreak,
        NodeKind::Text(text) => NodeValue::Text(text.clone()),
        NodeKind::Code(literal) => NodeValue::Code(NodeCode {
            num_backticks: 1,
            literal: literal.clone(),
        }),
        NodeKind::Emphasis => NodeValue::Emph,
        NodeKind::Strong => NodeValue::Strong,
        NodeKind::Link { destination, title } => NodeValue::Link(NodeLink {
            url: destination.clone(),
            title: title.clone(),
        }),
        NodeKind::Image { destination, title } => NodeValue::Image(NodeLink {
            url: destination.clone(),
            title: title.clone(),
        }),
        NodeKind::HtmlInline(html) => NodeValue::HtmlInline(html.clone()),
        NodeKind::SoftBreak => NodeValue::SoftBreak,
        NodeKind::LineBreak => NodeValue::LineBreak,
    };

    let ast = arena.alloc(AstNode::new(RefCell::new(Ast::new(
        value,
        LineColumn { line: 1, column: 1 },
    ))));
    for child in &node.children {
        ast.append(build(arena, child, child_list)?);
    }
    Ok(ast)
}
