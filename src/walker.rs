//! Source tree traversal.
//!
//! `SourceWalker` enumerates compilable units under a root directory as a
//! lazy iterator: one finite pass, no restart. Partials (files whose name
//! starts with `_`) are importable fragments and never yielded, and
//! unreadable directories count as empty rather than failing the build.

use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// Lazy iterator over compilable source files.
pub struct SourceWalker {
    iter: walkdir::IntoIter,
    /// Matched file suffix, with the leading dot (e.g. ".scss")
    suffix: String,
}

impl SourceWalker {
    /// Walk `root` for files matching `*.<extension>`, case-sensitively.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            iter: WalkDir::new(root.into()).into_iter(),
            suffix: format!(".{extension}"),
        }
    }

    /// A unit is a plain file with the configured suffix whose base name
    /// does not mark it as a partial.
    fn accepts(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        name.ends_with(&self.suffix) && !name.starts_with('_')
    }
}

impl Iterator for SourceWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            // Unreadable entries are skipped silently: a failed visit is
            // "nothing found here", not a build error.
            match self.iter.next()? {
                Ok(entry) if self.accepts(&entry) => return Some(entry.into_path()),
                _ => {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
