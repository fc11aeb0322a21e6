//! File lookup for the primary configuration file and its configSource
//! includes.
//!
//! All lookups are relative to one root directory: the directory of the
//! primary file. Paths that would leave the root resolve to "not found".

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A located configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Absolute path of the file.
    pub physical_path: PathBuf,
    /// File contents with any byte-order mark removed.
    pub contents: String,
}

/// Source of configuration files, rooted at a directory.
pub trait FileProvider: Send + Sync {
    /// Directory all subpaths are resolved against.
    fn root(&self) -> &Path;

    /// Locate and read a file by relative path.
    ///
    /// # Returns
    /// `Ok(None)` when no such file exists under the root.
    ///
    /// # Errors
    /// Returns an IO error when the file exists but cannot be read.
    fn get_file(&self, subpath: &str) -> Result<Option<FileInfo>>;
}

/// Normalise a subpath to a relative path below the root.
///
/// Leading separators are dropped and `\` is accepted as a separator.
/// Returns `None` for empty paths, drive-qualified paths and any path with a
/// `..` component.
fn normalize_subpath(subpath: &str) -> Option<PathBuf> {
    let trimmed = subpath.trim_start_matches(['/', '\\']);
    let mut relative = PathBuf::new();

    for part in trimmed.split(['/', '\\']) {
        match part {
            "" | "." => continue,
            ".." => return None,
            _ if part.contains(':') => return None,
            _ => relative.push(part),
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

fn strip_bom(contents: String) -> String {
    match contents.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => contents,
    }
}

/// File provider backed by the local file system.
#[derive(Debug, Clone)]
pub struct PhysicalFileProvider {
    root: PathBuf,
}

impl PhysicalFileProvider {
    /// Create a provider rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileProvider for PhysicalFileProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn get_file(&self, subpath: &str) -> Result<Option<FileInfo>> {
        let Some(relative) = normalize_subpath(subpath) else {
            return Ok(None);
        };

        let physical_path = self.root.join(relative);
        if !physical_path.is_file() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&physical_path)?;
        Ok(Some(FileInfo {
            physical_path,
            contents: strip_bom(contents),
        }))
    }
}

/// File provider holding files in memory.
///
/// Useful for tests and for embedding configuration that does not live on
/// disk. Physical paths are reported relative to a nominal root.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileProvider {
    root: PathBuf,
    files: HashMap<PathBuf, String>,
}

impl InMemoryFileProvider {
    /// Create an empty provider with the given nominal root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: HashMap::new(),
        }
    }

    /// Add a file. Subpaths that would escape the root are ignored.
    #[must_use]
    pub fn with_file(mut self, subpath: &str, contents: impl Into<String>) -> Self {
        if let Some(relative) = normalize_subpath(subpath) {
            self.files.insert(relative, contents.into());
        }
        self
    }
}

impl FileProvider for InMemoryFileProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn get_file(&self, subpath: &str) -> Result<Option<FileInfo>> {
        let file = normalize_subpath(subpath).and_then(|relative| {
            self.files.get(&relative).map(|contents| FileInfo {
                physical_path: self.root.join(&relative),
                contents: strip_bom(contents.clone()),
            })
        });
        Ok(file)
    }
}
