//! Subprocess adapter for a sassc-style command line engine.
//!
//! The engine command comes from `[build.engine].command` and is invoked
//! once per unit against a scratch directory. The scratch css (and map) are
//! read back as text and the scratch removed, so the adapter honors the
//! [`Compiler`](super::Compiler) contract: the engine never writes the real
//! artifacts. There is no timeout; a hung engine blocks the run.

use super::{CompileError, CompileOutput, Compiler};
use crate::config::{InputSyntax, OutputStyle, SassConfig};
use crate::log;
use crate::utils::exec;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// External engine built once from the shared configuration and reused,
/// read-only, for every invocation.
pub struct SasscEngine {
    command: Vec<String>,
    output_style: OutputStyle,
    precision: u8,
    source_comments: bool,
    include_paths: Vec<PathBuf>,
    syntax: InputSyntax,
    source_map: bool,
    omit_url: bool,
    embed_in_css: bool,
}

impl SasscEngine {
    /// Resolve the engine flags from configuration.
    pub fn from_config(config: &SassConfig) -> Self {
        let map = &config.build.source_map;
        if map.enable && map.embed_sources {
            log!("warn"; "source_map.embed_sources is not honored by the sassc command line; ignored");
        }
        if map_url_diverges(config) {
            log!("warn"; "source_map.output differs from build.output; the sourceMappingURL comment in the css still points to a sibling `<name>.css.map`");
        }

        Self {
            command: config.build.engine.command.clone(),
            output_style: config.effective_output_style(),
            precision: config.build.engine.precision,
            source_comments: config.build.engine.source_comments,
            include_paths: config.include_paths(),
            syntax: config.build.syntax,
            source_map: map.enable,
            omit_url: map.omit_url,
            embed_in_css: map.embed_in_css,
        }
    }

    /// Assemble the per-unit argument list.
    fn args(&self, input: &Path, scratch_css: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-t".into(),
            self.output_style.as_str().into(),
            "-p".into(),
            self.precision.to_string().into(),
        ];
        if self.source_comments {
            args.push("-l".into());
        }
        if self.syntax == InputSyntax::Sass {
            args.push("-a".into());
        }
        for path in &self.include_paths {
            args.push("-I".into());
            args.push(path.as_os_str().to_owned());
        }
        if self.source_map {
            if self.embed_in_css {
                args.push("--sourcemap=inline".into());
            } else {
                args.push("--sourcemap".into());
            }
            if self.omit_url {
                args.push("--omit-map-comment".into());
            }
        }
        args.push(input.as_os_str().to_owned());
        args.push(scratch_css.as_os_str().to_owned());
        args
    }
}

/// sassc has no flag for a custom map path: the sourceMappingURL comment it
/// embeds always names a sibling `<name>.css.map`, which is stale whenever
/// the map root is configured away from the css output root.
fn map_url_diverges(config: &SassConfig) -> bool {
    config.build.source_map.enable
        && !config.build.source_map.embed_in_css
        && config.source_map_root() != config.build.output
}

impl Compiler for SasscEngine {
    fn compile(
        &self,
        input: &Path,
        output: &Path,
        _source_map: &Path,
    ) -> Result<CompileOutput, CompileError> {
        // The scratch file reuses the real artifact name so the relative
        // sourceMappingURL linkage the engine emits stays correct.
        let scratch = tempfile::tempdir()
            .map_err(|err| CompileError::new(format!("Failed to create scratch dir: {err}")))?;
        let scratch_css = scratch
            .path()
            .join(output.file_name().unwrap_or_else(|| "out.css".as_ref()));

        exec::run(&self.command, self.args(input, &scratch_css))
            .map_err(|err| CompileError::new(format!("{err:#}")))?;

        let css = fs::read_to_string(&scratch_css).map_err(|err| {
            CompileError::new(format!(
                "Engine produced no output for `{}`: {err}",
                input.display()
            ))
        })?;

        // sassc names the map `<output>.map` next to the output file
        let source_map = if self.source_map && !self.embed_in_css {
            let mut map_name = scratch_css.into_os_string();
            map_name.push(".map");
            fs::read_to_string(PathBuf::from(map_name)).ok()
        } else {
            None
        };

        Ok(CompileOutput { css, source_map })
    }
}

// ============================================================================
// Tests
// ============================================================================
