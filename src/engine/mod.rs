//! External compilation engine interface.
//!
//! The grammar/cascade engine is an opaque collaborator behind the
//! [`Compiler`] trait: it receives an input path plus the intended output
//! and source map paths (used only as linkage hints inside generated
//! metadata), and returns compiled *text*. It never writes the artifacts
//! itself; the orchestrator owns all writes.

pub mod sassc;

pub use sassc::SasscEngine;

use std::path::Path;
use thiserror::Error;

/// Successful engine output for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    /// Compiled stylesheet text
    pub css: String,
    /// Source map text, present only when source maps are enabled
    pub source_map: Option<String>,
}

/// The engine rejected a unit.
///
/// Carries the engine's human-readable diagnostic (file/line/column/reason).
/// Recorded per unit, never retried, never aborts the walk.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One engine invocation per source unit.
pub trait Compiler: Sync {
    /// Compile `input`, returning compiled text or a diagnostic.
    ///
    /// `output` and `source_map` are hints for source map linkage only; no
    /// file is written at either path by the engine.
    fn compile(
        &self,
        input: &Path,
        output: &Path,
        source_map: &Path,
    ) -> Result<CompileOutput, CompileError>;
}
