//! Pure output-path derivation.
//!
//! Every compiled artifact mirrors its source's path relative to the input
//! root, re-rooted under the output root with the extension rewritten.
//! Nothing here touches the filesystem.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Output locations derived from one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Compiled stylesheet path under the output root
    pub css: PathBuf,
    /// Source map path under the source map root
    pub source_map: PathBuf,
}

impl ArtifactPaths {
    /// Derive both artifact paths for `input`, which must live under
    /// `source_root`.
    pub fn map(
        input: &Path,
        source_root: &Path,
        output_root: &Path,
        map_root: &Path,
        extension: &str,
    ) -> Result<Self> {
        Ok(Self {
            css: map_to_output(source_root, output_root, input, extension)?,
            source_map: map_to_source_map(map_root, source_root, input)?,
        })
    }
}

/// Mirror `input` from under `from_root` to the same relative path under
/// `to_root`.
pub fn mirror(from_root: &Path, to_root: &Path, input: &Path) -> Result<PathBuf> {
    let relative = input.strip_prefix(from_root).with_context(|| {
        format!(
            "`{}` is not under `{}`",
            input.display(),
            from_root.display()
        )
    })?;
    Ok(to_root.join(relative))
}

/// Compiled css path: mirror under `output_root`, rewriting the trailing
/// `.{extension}` to `.css`.
pub fn map_to_output(
    source_root: &Path,
    output_root: &Path,
    input: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let mirrored = mirror(source_root, output_root, input)?;
    Ok(rewrite_suffix(&mirrored, &format!(".{extension}"), ".css"))
}

/// Source map path: mirror under `map_root`, rewriting a trailing `.scss`
/// to `.css.map`.
///
/// The `.scss` suffix is fixed here regardless of the configured syntax, so
/// a `.sass` input keeps its name; the configuration layer warns about that
/// combination instead of second-guessing it.
pub fn map_to_source_map(map_root: &Path, source_root: &Path, input: &Path) -> Result<PathBuf> {
    let mirrored = mirror(source_root, map_root, input)?;
    Ok(rewrite_suffix(&mirrored, ".scss", ".css.map"))
}

/// Rewrite a trailing `from` on the file name to `to`; paths without the
/// suffix pass through unchanged.
fn rewrite_suffix(path: &Path, from: &str, to: &str) -> PathBuf {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return path.to_path_buf();
    };
    match name.strip_suffix(from) {
        Some(stem) => path.with_file_name(format!("{stem}{to}")),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_to_output_flat() {
        let out =
            map_to_output(Path::new("/src"), Path::new("/out"), Path::new("/src/a.scss"), "scss")
                .unwrap();
        assert_eq!(out, PathBuf::from("/out/a.css"));
    }

    #[test]
    fn test_map_to_output_mirrors_subdirectories() {
        let out = map_to_output(
            Path::new("/src"),
            Path::new("/out"),
            Path::new("/src/b/c/d.scss"),
            "scss",
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/out/b/c/d.css"));
    }

    #[test]
    fn test_map_to_output_sass_extension() {
        let out =
            map_to_output(Path::new("/src"), Path::new("/out"), Path::new("/src/a.sass"), "sass")
                .unwrap();
        assert_eq!(out, PathBuf::from("/out/a.css"));
    }

    #[test]
    fn test_map_to_output_outside_root_fails() {
        let result = map_to_output(
            Path::new("/src"),
            Path::new("/out"),
            Path::new("/elsewhere/a.scss"),
            "scss",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_map_to_source_map() {
        let map = map_to_source_map(
            Path::new("/maps"),
            Path::new("/src"),
            Path::new("/src/b/a.scss"),
        )
        .unwrap();
        assert_eq!(map, PathBuf::from("/maps/b/a.css.map"));
    }

    #[test]
    fn test_map_to_source_map_keeps_sass_name() {
        // the rewrite only applies to a `.scss` suffix
        let map = map_to_source_map(
            Path::new("/maps"),
            Path::new("/src"),
            Path::new("/src/a.sass"),
        )
        .unwrap();
        assert_eq!(map, PathBuf::from("/maps/a.sass"));
    }

    #[test]
    fn test_mirror_round_trip_is_identity() {
        let src = Path::new("/src");
        let out = Path::new("/out");
        let input = Path::new("/src/b/c/d.scss");

        let there = mirror(src, out, input).unwrap();
        let back = mirror(out, src, &there).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_artifact_paths_share_relative_path() {
        let paths = ArtifactPaths::map(
            Path::new("/src/b/a.scss"),
            Path::new("/src"),
            Path::new("/out"),
            Path::new("/maps"),
            "scss",
        )
        .unwrap();
        assert_eq!(paths.css, PathBuf::from("/out/b/a.css"));
        assert_eq!(paths.source_map, PathBuf::from("/maps/b/a.css.map"));
    }

    #[test]
    fn test_rewrite_suffix_only_at_end() {
        let rewritten = rewrite_suffix(Path::new("/out/a.scss.bak"), ".scss", ".css");
        assert_eq!(rewritten, PathBuf::from("/out/a.scss.bak"));
    }
}
