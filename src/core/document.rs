use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{FixError, FixResult};

/// The target file as an ordered sequence of lines.
///
/// Every line keeps its own terminator (`\n`, `\r\n`, or none for an
/// unterminated last line), so `concat(lines)` is the original content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits `content` into terminator-preserving lines.
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Reads the whole file at `path`.
    pub fn read(path: &Path) -> FixResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| FixError::io(path, e))?;
        let document = Self::from_content(&content);
        debug!(path = %path.display(), lines = document.len(), "read document");
        Ok(document)
    }

    /// Overwrites `path` with the document.
    ///
    /// With `atomic` set, the content is written to a temporary file in the
    /// same directory and renamed over `path`, so an interrupted write never
    /// leaves a truncated target. Otherwise the file is truncated and written
    /// in place.
    pub fn write(&self, path: &Path, atomic: bool) -> FixResult<()> {
        let content = self.to_content();
        if atomic {
            write_atomic(path, &content)?;
        } else {
            fs::write(path, &content).map_err(|e| FixError::io(path, e))?;
        }
        debug!(path = %path.display(), lines = self.len(), atomic, "wrote document");
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_content(&self) -> String {
        self.lines.concat()
    }
}

/// Strips the line terminator so patterns never see `\r` or `\n`.
pub fn line_body(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

fn write_atomic(path: &Path, content: &str) -> FixResult<()> {
    // Rename through a symlink would replace the link itself; write to what it points at.
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = resolved.as_path();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = NamedTempFile::new_in(&dir).map_err(|e| FixError::io(&dir, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| FixError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| FixError::io(temp.path(), e))?;

    // Temp files are created owner-only; keep the target's mode.
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| FixError::io(temp.path(), e))?;
    }

    temp.persist(path).map_err(|e| FixError::io(path, e.error))?;
    Ok(())
}
