//! Markdown file discovery.
//!
//! Walks a directory tree, keeps `.md` files, and drops files that live
//! directly inside an ignored directory or that carry the generation marker.
//! Each surviving file is read exactly once.

mod document;

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use markdown_index_shared::{MARKDOWN_EXTENSION, MarkdownIndexError, Result};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

pub use document::{SourceDocument, load_document, path_depth, relative_display_path};

/// Discover and load every indexable document under `root`.
///
/// Entries are visited sorted by file name within each directory, so the
/// returned order is stable across platforms. Any walk or read failure aborts
/// the whole operation.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn discover(root: &Path, ignored_directories: &BTreeSet<String>) -> Result<Vec<SourceDocument>> {
    let mut documents = Vec::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            MarkdownIndexError::walk(path, e.to_string())
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) != Some(MARKDOWN_EXTENSION) {
            continue;
        }

        if let Some(parent) = parent_name(path) {
            if ignored_directories.contains(parent) {
                debug!(path = %path.display(), parent, "skipping file in ignored directory");
                skipped += 1;
                continue;
            }
        }

        let document = load_document(root, path)?;
        if document.is_generated() {
            debug!(path = %path.display(), "skipping generated file");
            skipped += 1;
            continue;
        }

        documents.push(document);
    }

    info!(documents = documents.len(), skipped, "discovery complete");
    Ok(documents)
}

/// Base name of the directory directly containing `path`.
fn parent_name(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}
