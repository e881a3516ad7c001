//! Line-oriented input files

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A whole input file, split into lines
#[derive(Debug, Clone)]
pub struct FileData {
    pub path: PathBuf,
    lines: Vec<String>,
}

impl FileData {
    /// Read `path` completely. Trailing '\r' is stripped from every line.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} ({} bytes)", path.display(), contents.len());
        Ok(Self::from_source(path, &contents))
    }

    /// Build from in-memory text (used by tests and by `read`)
    pub fn from_source(path: impl Into<PathBuf>, contents: &str) -> Self {
        Self {
            path: path.into(),
            lines: contents
                .lines()
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect(),
        }
    }

    /// File name without directories
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// File name up to its first '.'
    pub fn base_name(&self) -> &str {
        crate::base_name(self.file_name())
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
