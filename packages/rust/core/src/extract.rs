//! Abstract extraction: pick the heading that summarizes a document.

use std::ops::ControlFlow;

use markdown_index_markdown::{Node, NodeKind, walk};
use markdown_index_shared::{Abstract, DEFAULT_TOC_TITLE};

/// What to look for while extracting.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions<'a> {
    /// Heading text that wins over the first heading when present.
    pub search_heading: Option<&'a str>,
    /// Title of a generated table of contents; headings with this text are
    /// never picked.
    pub toc_title: &'a str,
}

impl Default for ExtractOptions<'_> {
    fn default() -> Self {
        Self {
            search_heading: None,
            toc_title: DEFAULT_TOC_TITLE,
        }
    }
}

/// Running state of the heading walk.
#[derive(Debug, Default)]
struct Accumulator {
    /// First eligible heading seen, used when the search heading never shows up.
    first: Option<Abstract>,
}

/// Extract the abstract of a parsed document.
///
/// The first heading (other than a table of contents title) is the default
/// candidate. When `search_heading` is set and some heading's text equals it
/// exactly, that heading wins and the walk stops there. The body is the text of
/// the node directly after the heading, or empty when the heading is last.
/// Returns `None` for a document with no eligible heading.
pub fn extract(root: &Node, options: &ExtractOptions<'_>) -> Option<Abstract> {
    let search = options.search_heading.filter(|heading| !heading.is_empty());
    let toc_title = options.toc_title.trim();
    let mut acc = Accumulator::default();

    let flow = walk(&root.children, &mut |node, siblings, index| {
        visit(node, siblings, index, search, toc_title, &mut acc)
    });

    match flow {
        ControlFlow::Break(found) => Some(found),
        ControlFlow::Continue(()) => acc.first,
    }
}

fn visit(
    node: &Node,
    siblings: &[Node],
    index: usize,
    search: Option<&str>,
    toc_title: &str,
    acc: &mut Accumulator,
) -> ControlFlow<Abstract> {
    let NodeKind::Heading { .. } = node.kind else {
        return ControlFlow::Continue(());
    };

    let title = node.plain_text();
    if title == toc_title {
        return ControlFlow::Continue(());
    }

    let body = || siblings.get(index + 1).map(Node::text).unwrap_or_default();

    if search == Some(title.as_str()) {
        return ControlFlow::Break(Abstract::new(title, body()));
    }
    if acc.first.is_none() {
        acc.first = Some(Abstract::new(title, body()));
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use markdown_index_markdown::{ParseOptions, parse};

    use super::*;

    fn extract_with(md: &str, options: ExtractOptions<'_>) -> Option<Abstract> {
        let doc = parse(md, &ParseOptions::default());
        extract(&doc.root, &options)
    }

    fn extract_from(md: &str, search: Option<&str>) -> Option<Abstract> {
        extract_with(
            md,
            ExtractOptions {
                search_heading: search,
                ..Default::default()
            },
        )
    }

    #[test]
    fn no_heading_is_absent() {
        assert_eq!(extract_from("just text\n\n- and a list\n", None), None);
        assert_eq!(extract_from("", Some("Abstract")), None);
    }

    #[test]
    fn single_heading_without_next_node_has_empty_body() {
        assert_eq!(extract_from("# Only\n", None), Some(Abstract::new("Only", "")));
    }

    #[test]
    fn first_heading_is_default() {
        assert_eq!(
            extract_from("# Intro\n\nHello\n\n## Later\n\nMore\n", None),
            Some(Abstract::new("Intro", "Hello"))
        );
    }

    #[test]
    fn search_heading_overrides_earlier_headings() {
        let md = "# Intro\n\nHello\n\n## Abstract\n\nThe real summary.\n\n## Abstract\n\nSecond.\n";
        assert_eq!(
            extract_from(md, Some("Abstract")),
            Some(Abstract::new("Abstract", "The real summary."))
        );
    }

    #[test]
    fn missing_search_heading_falls_back_to_first() {
        assert_eq!(
            extract_from("# Intro\n\nHello\n", Some("Abstract")),
            Some(Abstract::new("Intro", "Hello"))
        );
    }

    #[test]
    fn empty_search_heading_is_ignored() {
        assert_eq!(
            extract_from("# Intro\n\nHello\n\n# Other\n", Some("")),
            Some(Abstract::new("Intro", "Hello"))
        );
    }

    #[test]
    fn table_of_contents_heading_is_skipped() {
        let md = "# Table of Contents\n\n- [A](#a)\n\n# A\n\nBody A\n";
        assert_eq!(extract_from(md, None), Some(Abstract::new("A", "Body A")));
    }

    #[test]
    fn configured_toc_title_is_skipped() {
        let md = "# Contents\n\n- [A](#a)\n\n# A\n\nBody A\n";
        let options = ExtractOptions {
            search_heading: None,
            toc_title: "Contents",
        };
        assert_eq!(extract_with(md, options), Some(Abstract::new("A", "Body A")));
        assert_eq!(
            extract_from(md, None),
            Some(Abstract::new("Contents", "A"))
        );
    }

    #[test]
    fn body_is_next_sibling_text_even_when_heading() {
        assert_eq!(
            extract_from("# Title\n## Subtitle\n", None),
            Some(Abstract::new("Title", "Subtitle"))
        );
    }

    #[test]
    fn multi_line_paragraph_body_keeps_newlines() {
        assert_eq!(
            extract_from("# T\nline one\nline two\n", None),
            Some(Abstract::new("T", "line one\nline two"))
        );
    }

    #[test]
    fn title_is_plain_text() {
        assert_eq!(
            extract_from("# The **bold** `plan`\n\nText with *emphasis*.\n", None),
            Some(Abstract::new("The bold plan", "Text with emphasis."))
        );
    }

    #[test]
    fn code_block_body_is_empty() {
        assert_eq!(
            extract_from("# Setup\n\n```sh\n# install\nmake\n```\n", None),
            Some(Abstract::new("Setup", ""))
        );
    }

    #[test]
    fn nested_code_is_left_out_of_the_body() {
        assert_eq!(
            extract_from("# Setup\n\n> ```sh\n> # install deps\n> make\n> ```\n", None),
            Some(Abstract::new("Setup", ""))
        );
        assert_eq!(
            extract_from("# Steps\n\n- run\n\n  ```\n  # comment\n  ```\n- done\n", None),
            Some(Abstract::new("Steps", "run\ndone"))
        );
    }

    #[test]
    fn list_body_joins_item_text() {
        assert_eq!(
            extract_from("# Steps\n\n- one\n- two\n", None),
            Some(Abstract::new("Steps", "one\ntwo"))
        );
    }

    #[test]
    fn nested_headings_are_found() {
        assert_eq!(
            extract_from("> # Quoted\n> inside\n", None),
            Some(Abstract::new("Quoted", "inside"))
        );
    }
}
