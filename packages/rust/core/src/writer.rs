//! Output file writing.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use markdown_index_shared::{GENERATION_MARKER, MarkdownIndexError, Result};

/// What was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub path: PathBuf,
    /// Size of the file in bytes, marker included.
    pub bytes: usize,
    /// Lowercase hex SHA-256 of the file contents.
    pub sha256: String,
}

/// Exact file contents for `content`, with the generation marker prepended
/// when requested.
pub fn output_bytes(content: &str, with_marker: bool) -> Vec<u8> {
    let marker = if with_marker { GENERATION_MARKER } else { "" };
    let mut buffer = Vec::with_capacity(marker.len() + content.len());
    buffer.extend_from_slice(marker.as_bytes());
    buffer.extend_from_slice(content.as_bytes());
    buffer
}

/// Replace the file at `path` with `content`.
///
/// Any existing file is removed first, then the whole buffer is written in one
/// call.
#[instrument(skip_all, fields(path = %path.display(), with_marker = with_marker))]
pub fn write_output(path: &Path, content: &str, with_marker: bool) -> Result<WrittenOutput> {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("removed previous output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(MarkdownIndexError::io(path, e)),
    }

    let buffer = output_bytes(content, with_marker);
    std::fs::write(path, &buffer).map_err(|e| MarkdownIndexError::io(path, e))?;

    let mut hasher = Sha256::new();
    hasher.update(&buffer);
    let sha256 = format!("{:x}", hasher.finalize());

    info!(bytes = buffer.len(), %sha256, "index written");

    Ok(WrittenOutput {
        path: path.to_path_buf(),
        bytes: buffer.len(),
        sha256,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("markdown-index-{}", uuid::Uuid::now_v7()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_marker_then_content() {
        let dir = temp_dir();
        let path = dir.join("index.md");

        let written = write_output(&path, "# Hi\n", true).unwrap();
        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, "---\ngenerated-by: markdown-index\n---\n# Hi\n");
        assert_eq!(written.bytes, on_disk.len());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn replaces_existing_file() {
        let dir = temp_dir();
        let path = dir.join("index.md");
        fs::write(&path, "a much longer previous file that must disappear entirely").unwrap();

        write_output(&path, "short\n", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn digest_covers_written_bytes() {
        let dir = temp_dir();
        let path = dir.join("index.md");

        let written = write_output(&path, "", false).unwrap();
        assert_eq!(
            written.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let marked = write_output(&path, "", true).unwrap();
        let expected = format!("{:x}", Sha256::digest(GENERATION_MARKER.as_bytes()));
        assert_eq!(marked.sha256, expected);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("markdown-index-missing-{}", uuid::Uuid::now_v7()))
            .join("index.md");
        let err = write_output(&path, "x", true).unwrap_err();
        assert!(matches!(err, MarkdownIndexError::Io { .. }));
    }

    #[test]
    fn output_bytes_without_marker_is_content() {
        assert_eq!(output_bytes("abc", false), b"abc");
        assert!(output_bytes("abc", true).starts_with(b"---\n"));
    }
}
