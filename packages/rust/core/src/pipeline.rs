//! End-to-end index pipeline: directory → discovery → abstracts → composite →
//! table of contents → render → file.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use markdown_index_discovery::discover;
use markdown_index_shared::{IndexConfig, OutputFormat, Result};

use crate::assembler::{IndexEntry, assemble};
use crate::extract::ExtractOptions;
use crate::toc::{TocOptions, build_toc};
use crate::writer::write_output;

/// Rendered index that has not been written yet.
#[derive(Debug, Clone)]
pub struct GeneratedIndex {
    /// Rendered index, without the generation marker.
    pub content: String,
    /// Form of `content`.
    pub format: OutputFormat,
    /// Number of documents included.
    pub document_count: usize,
    /// Per-document entries, in discovery order.
    pub entries: Vec<IndexEntry>,
}

/// Result of [`build_index`].
#[derive(Debug, Clone)]
pub struct IndexResult {
    /// Path of the written index file.
    pub output_path: PathBuf,
    /// Number of documents included.
    pub document_count: usize,
    /// Number of documents that had no heading.
    pub untitled_count: usize,
    /// Bytes written, marker included.
    pub bytes: usize,
    /// SHA-256 of the written file.
    pub sha256: String,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each document's abstract is extracted.
    fn document_indexed(&self, path: &str, current: usize, total: usize);
    /// Called when the index file has been written.
    fn done(&self, result: &IndexResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_indexed(&self, _path: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &IndexResult) {}
}

/// Run everything up to (not including) the write.
#[instrument(skip_all, fields(root = %config.root.display(), format = %config.format))]
pub fn generate_index(
    config: &IndexConfig,
    progress: &dyn ProgressReporter,
) -> Result<GeneratedIndex> {
    config.validate()?;

    progress.phase("Discovering documents");
    let documents = discover(&config.root, &config.ignored_directories)?;
    if documents.is_empty() {
        warn!("no markdown documents found");
    }

    progress.phase("Extracting abstracts");
    let extract_options = ExtractOptions {
        search_heading: config.search_heading.as_deref(),
        toc_title: &config.toc_title,
    };
    let total = documents.len();
    let entries: Vec<IndexEntry> = documents
        .iter()
        .enumerate()
        .map(|(i, document)| {
            let entry = IndexEntry::from_document(document, &extract_options);
            progress.document_indexed(&document.relative_path, i + 1, total);
            entry
        })
        .collect();

    progress.phase("Assembling composite document");
    let composite = assemble(&entries).to_markdown()?;

    progress.phase("Building table of contents");
    let document = build_toc(
        composite.as_bytes(),
        &TocOptions {
            title: config.toc_title.clone(),
        },
    )?;

    progress.phase("Rendering");
    let content = document.render(config.format)?;

    Ok(GeneratedIndex {
        content,
        format: config.format,
        document_count: total,
        entries,
    })
}

/// Run the full pipeline and write the index file under the scan root.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn build_index(config: &IndexConfig, progress: &dyn ProgressReporter) -> Result<IndexResult> {
    let start = Instant::now();
    let generated = generate_index(config, progress)?;

    progress.phase("Writing index");
    let written = write_output(&config.output_path(), &generated.content, config.with_marker)?;

    let result = IndexResult {
        output_path: written.path,
        document_count: generated.document_count,
        untitled_count: generated
            .entries
            .iter()
            .filter(|entry| entry.summary.is_none())
            .count(),
        bytes: written.bytes,
        sha256: written.sha256,
        elapsed: start.elapsed(),
    };

    info!(
        documents = result.document_count,
        bytes = result.bytes,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "index pipeline complete"
    );

    progress.done(&result);
    Ok(result)
}
