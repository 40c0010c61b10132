//! Shared types, error model, and configuration for markdown-index.
//!
//! This crate is the foundation depended on by all other markdown-index crates.
//! It provides:
//! - [`MarkdownIndexError`], the unified error type
//! - Domain types ([`Abstract`], [`OutputFormat`]) and generation-marker constants
//! - Configuration ([`AppConfig`], [`IndexConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_OUTPUT_NAME, DEFAULT_SEARCH_HEADING, DEFAULT_TOC_TITLE, IndexConfig,
    IndexDefaults, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{MarkdownIndexError, Result};
pub use types::{
    Abstract, GENERATED_BY_KEY, GENERATED_BY_VALUE, GENERATION_MARKER, MARKDOWN_EXTENSION,
    OutputFormat,
};
