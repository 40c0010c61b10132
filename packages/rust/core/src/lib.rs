//! Index generation for markdown-index.
//!
//! Ties discovery, abstract extraction, composite assembly, table of contents
//! generation, rendering and output writing into one pipeline
//! ([`pipeline::build_index`]).

pub mod assembler;
pub mod extract;
pub mod pipeline;
pub mod toc;
pub mod writer;

pub use assembler::{CompositeDocument, IndexEntry, READ_MORE_LABEL, assemble};
pub use extract::{ExtractOptions, extract};
pub use pipeline::{
    GeneratedIndex, IndexResult, ProgressReporter, SilentProgress, build_index, generate_index,
};
pub use toc::{TocEntry, TocOptions, build_toc, collect_entries};
pub use writer::{WrittenOutput, output_bytes, write_output};
