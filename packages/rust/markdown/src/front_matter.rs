//! YAML front-matter detection and parsing.

use std::collections::BTreeMap;

const BOM: &str = "\u{feff}";

/// Parsed front-matter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Scalar fields, stringified (`true`, `3`, `text`).
    pub fields: BTreeMap<String, String>,
    /// Byte offset of the first byte after the closing delimiter line.
    pub body_offset: usize,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Byte offset just past the closing `---` line of a leading front-matter
/// block, or `None` when `text` does not start with one.
///
/// The block must open on the first line (an optional BOM is allowed) and be
/// closed by a `---` or `...` line.
pub fn front_matter_end(text: &str) -> Option<usize> {
    let bom_len = if text.starts_with(BOM) { BOM.len() } else { 0 };

    let mut offset = bom_len;
    let mut lines = text[bom_len..].split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }
    offset += first.len();

    for line in lines {
        offset += line.len();
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some(offset);
        }
    }
    None
}

/// Extract the front-matter block of a document.
///
/// Returns `None` when there is no block, the block is empty, or its YAML
/// does not parse to a mapping.
pub fn extract_front_matter(source: &[u8]) -> Option<FrontMatter> {
    let text = String::from_utf8_lossy(source);
    let body_offset = front_matter_end(&text)?;

    let block = &text[..body_offset];
    let yaml: Vec<&str> = block
        .trim_start_matches(BOM)
        .lines()
        .skip(1)
        .filter(|line| !matches!(line.trim_end(), "---" | "..."))
        .collect();

    if yaml.iter().all(|line| line.trim().is_empty()) {
        return None;
    }

    let fields = parse_scalar_map(&yaml.join("\n"))?;
    Some(FrontMatter {
        fields,
        body_offset,
    })
}

/// Parse a YAML mapping, keeping only scalar values.
fn parse_scalar_map(yaml: &str) -> Option<BTreeMap<String, String>> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml).ok()?;
    let serde_yaml::Value::Mapping(mapping) = value else {
        return None;
    };

    let fields = mapping
        .into_iter()
        .filter_map(|(key, value)| Some((scalar_to_string(key)?, scalar_to_string(value)?)))
        .collect();
    Some(fields)
}

fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
