//! Artifact persistence.
//!
//! Filesystem failures here signal an unrecoverable environment problem and
//! abort the whole run, unlike engine diagnostics which are recorded per
//! unit and never stop the walk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write compiled text as UTF-8, creating parent directories as needed and
/// fully replacing any prior file at `path`.
pub fn write(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).with_context(|| format!("Failed to write `{}`", path.display()))
}

/// Copy a raw source file to `dest`, creating parent directories as needed.
pub fn copy(source: &Path, dest: &Path) -> Result<()> {
    ensure_parent(dest)?;
    fs::copy(source, dest).with_context(|| {
        format!(
            "Failed to copy `{}` to `{}`",
            source.display(),
            dest.display()
        )
    })?;
    Ok(())
}

/// Creating parents must not fail if they already exist.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create `{}`", parent.display()))?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
