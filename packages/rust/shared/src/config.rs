//! Application configuration for markdown-index.
//!
//! User config lives at `~/.markdown-index/markdown-index.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MarkdownIndexError, Result};
use crate::types::OutputFormat;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "markdown-index.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".markdown-index";

/// Default name of the generated index file.
pub const DEFAULT_OUTPUT_NAME: &str = "markdown-index.md";

/// Heading preferred as a file's abstract unless configured otherwise.
pub const DEFAULT_SEARCH_HEADING: &str = "Abstract";

/// Default title of the generated table of contents.
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

// ---------------------------------------------------------------------------
// Config structs (matching markdown-index.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Index generation defaults.
    #[serde(default)]
    pub index: IndexDefaults,
}

/// `[index]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDefaults {
    /// File name of the generated index, created inside the scanned directory.
    #[serde(default = "default_output")]
    pub output: String,

    /// Directory base names whose files are never indexed.
    #[serde(default)]
    pub skip_directories: Vec<String>,

    /// Heading whose section is preferred as a file's abstract. An empty
    /// string turns the preference off.
    #[serde(default = "default_heading")]
    pub heading: String,

    /// Output form.
    #[serde(default)]
    pub format: OutputFormat,

    /// Whether to stamp the generation marker on the output.
    #[serde(default = "default_true")]
    pub marker: bool,

    /// Title of the generated table of contents.
    #[serde(default = "default_toc_title")]
    pub toc_title: String,
}

impl Default for IndexDefaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            skip_directories: Vec::new(),
            heading: default_heading(),
            format: OutputFormat::default(),
            marker: true,
            toc_title: default_toc_title(),
        }
    }
}

fn default_output() -> String {
    DEFAULT_OUTPUT_NAME.into()
}
fn default_heading() -> String {
    DEFAULT_SEARCH_HEADING.into()
}
fn default_true() -> bool {
    true
}
fn default_toc_title() -> String {
    DEFAULT_TOC_TITLE.into()
}

// ---------------------------------------------------------------------------
// Index config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime index configuration: config file values, overridden by CLI flags.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Directory scanned recursively.
    pub root: PathBuf,
    /// Output file name, resolved under `root`.
    pub output: String,
    /// Parent-directory base names to skip (exact match).
    pub ignored_directories: BTreeSet<String>,
    /// Heading preferred as abstract. `None` means first-heading policy only.
    pub search_heading: Option<String>,
    /// Output form.
    pub format: OutputFormat,
    /// Whether the written file carries the generation marker.
    pub with_marker: bool,
    /// Title heading placed above the navigation list.
    pub toc_title: String,
}

impl IndexConfig {
    /// Build a runtime config for `root` from the loaded app config.
    pub fn new(root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        let defaults = &config.index;
        Self {
            root: root.into(),
            output: defaults.output.clone(),
            ignored_directories: defaults.skip_directories.iter().cloned().collect(),
            search_heading: Some(defaults.heading.clone())
                .filter(|heading| !heading.trim().is_empty()),
            format: defaults.format,
            with_marker: defaults.marker,
            toc_title: defaults.toc_title.clone(),
        }
    }

    /// Absolute-or-relative path of the index file (`root/output`).
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }

    /// Reject output names that would escape the scanned directory.
    pub fn validate(&self) -> Result<()> {
        let name = Path::new(&self.output);
        let single_component = name.components().count() == 1
            && matches!(name.components().next(), Some(std::path::Component::Normal(_)));

        if self.output.trim().is_empty() || !single_component {
            return Err(MarkdownIndexError::validation(format!(
                "output must be a plain file name, got '{}'",
                self.output
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.markdown-index/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MarkdownIndexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.markdown-index/markdown-index.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MarkdownIndexError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        MarkdownIndexError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MarkdownIndexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MarkdownIndexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MarkdownIndexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
