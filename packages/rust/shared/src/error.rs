//! Error types for markdown-index.
//!
//! Library crates use [`MarkdownIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all markdown-index operations.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownIndexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed (permission denied, vanished entry, ...).
    #[error("walk error at {path:?}: {message}")]
    Walk { path: PathBuf, message: String },

    /// A renderer hit a tree it cannot serialize.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid input value (bad output name, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MarkdownIndexError>;

impl MarkdownIndexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a render error from any displayable message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a walk error for the given path.
    pub fn walk(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Walk {
            path: path.into(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = MarkdownIndexError::config("unknown format 'pdf'");
        assert_eq!(err.to_string(), "config error: unknown format 'pdf'");

        let err = MarkdownIndexError::render("span 10..20 outside source of 4 bytes");
        assert!(err.to_string().starts_with("render error:"));
    }

    #[test]
    fn io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = MarkdownIndexError::io("/wiki/private/notes.md", source);
        assert!(err.to_string().contains("/wiki/private/notes.md"));
    }

    #[test]
    fn walk_error_names_path() {
        let err = MarkdownIndexError::walk("/wiki/locked", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("/wiki/locked"));
        assert!(msg.contains("permission denied"));
    }
}
