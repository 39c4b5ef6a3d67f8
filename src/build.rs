//! Build orchestration.
//!
//! Drives one full tree walk: discover units, derive artifact paths, invoke
//! the engine per unit, write artifacts, aggregate the outcome.
//!
//! ```text
//! SourceWalker ──► units ──► ArtifactPaths ──► engine.compile()
//!                                                   │
//!                              writer ◄── css / map ┘
//!                                                   │
//!                               BuildReport ◄───────┘
//! ```
//!
//! Units are independent (no artifact depends on another's output) and are
//! processed in parallel with atomic aggregate counters. An engine rejection
//! is recorded and the walk continues; a filesystem failure aborts the whole
//! run immediately.

use crate::config::SassConfig;
use crate::engine::Compiler;
use crate::log;
use crate::paths::{self, ArtifactPaths};
use crate::walker::SourceWalker;
use crate::writer;
use anyhow::{Result, bail};
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Aggregate counters for one whole tree walk, immutable once returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Units processed, success or failure
    pub files: usize,
    /// Units the engine rejected
    pub errors: usize,
}

/// Compile every unit under the input root and apply the build-success
/// policy.
///
/// Fails when the filesystem breaks mid-run, or when at least one unit
/// failed to compile and `fail_on_error` is set.
pub fn build_tree(config: &SassConfig, engine: &dyn Compiler) -> Result<BuildReport> {
    config.validate();

    let input_root = &config.build.input;
    let output_root = &config.build.output;
    let map_root = config.source_map_root();
    let extension = config.build.syntax.extension();

    let units: Vec<PathBuf> = SourceWalker::new(input_root, extension).collect();

    let files = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    units.par_iter().try_for_each(|unit| {
        files.fetch_add(1, Ordering::Relaxed);
        if !process_unit(unit, config, engine, input_root, output_root, map_root)? {
            errors.fetch_add(1, Ordering::Relaxed);
        }
        Ok::<(), anyhow::Error>(())
    })?;

    let report = BuildReport {
        files: files.load(Ordering::Relaxed),
        errors: errors.load(Ordering::Relaxed),
    };

    log!("build"; "Compiled {} files", report.files);
    if report.errors > 0 {
        if config.build.fail_on_error {
            bail!("Failed with {} errors", report.errors);
        }
        log!("error"; "Failed with {} errors. Continuing due to fail_on_error=false.", report.errors);
    }

    Ok(report)
}

/// Process one source unit: map, optionally copy, compile, write.
///
/// Returns `false` when the engine rejected the unit (already logged).
/// Filesystem errors propagate and are fatal for the run.
fn process_unit(
    unit: &Path,
    config: &SassConfig,
    engine: &dyn Compiler,
    input_root: &Path,
    output_root: &Path,
    map_root: &Path,
) -> Result<bool> {
    let artifacts = ArtifactPaths::map(
        unit,
        input_root,
        output_root,
        map_root,
        config.build.syntax.extension(),
    )?;

    // With copy_source_to_output the co-located copy becomes the engine's
    // recorded input, so source references point into the output tree.
    let input: Cow<'_, Path> = if config.build.copy_source_to_output {
        let copy = paths::mirror(input_root, output_root, unit)?;
        writer::copy(unit, &copy)?;
        Cow::Owned(copy)
    } else {
        Cow::Borrowed(unit)
    };

    match engine.compile(&input, &artifacts.css, &artifacts.source_map) {
        Ok(output) => {
            writer::write(&artifacts.css, &output.css)?;
            if config.build.source_map.enable {
                if let Some(map) = output.source_map.as_deref() {
                    writer::write(&artifacts.source_map, map)?;
                }
            }
            Ok(true)
        }
        Err(err) => {
            log!("error"; "{}: {err}", unit.display());
            Ok(false)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
