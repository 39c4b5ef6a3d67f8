//! Build configuration management for `sassbuild.toml`.
//!
//! # Sections
//!
//! | Section              | Purpose                                        |
//! |----------------------|------------------------------------------------|
//! | `[build]`            | Roots, syntax, include paths, failure policy   |
//! | `[build.engine]`     | External engine command, style, precision      |
//! | `[build.source_map]` | Source map generation and embedding flags      |
//!
//! # Example
//!
//! ```toml
//! [build]
//! input = "src/main/sass"
//! output = "target/css"
//! fail_on_error = true
//!
//! [build.engine]
//! command = ["sassc"]
//! output_style = "compressed"
//!
//! [build.source_map]
//! enable = true
//! ```
//!
//! Validation is advisory: contradictory settings are logged as warnings and
//! the nearest supported behavior is substituted, the run is never aborted.

pub mod defaults;
mod error;

use crate::cli::Cli;
use crate::log;
use anyhow::Result;
use educe::Educe;
use error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Enums
// ============================================================================

/// Output style for the generated css code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Indented rule blocks (default).
    #[default]
    Nested,
    /// One declaration per line, braces on their own lines.
    Expanded,
    /// One rule per line.
    Compact,
    /// Minified output.
    Compressed,
}

impl OutputStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::Expanded => "expanded",
            Self::Compact => "compact",
            Self::Compressed => "compressed",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input syntax of the scanned files.
///
/// Selects both the scanned file extension and the engine's grammar mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputSyntax {
    /// Brace syntax, `.scss` files (default).
    #[default]
    Scss,
    /// Indented syntax, `.sass` files.
    Sass,
}

impl InputSyntax {
    /// File extension scanned for this syntax, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Scss => "scss",
            Self::Sass => "sass",
        }
    }
}

impl fmt::Display for InputSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing sassbuild.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SassConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

/// `[build]` section - compilation roots and policy.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Source root scanned recursively for compilable files.
    #[serde(default = "defaults::build::input")]
    #[educe(Default = defaults::build::input())]
    pub input: PathBuf,

    /// Root under which compiled css artifacts are written.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Additional `@import` resolution roots, ';'-separated.
    #[serde(default)]
    pub include_path: Option<String>,

    /// Input syntax, selects the scanned extension and grammar mode.
    #[serde(default)]
    pub syntax: InputSyntax,

    /// Fail the run when at least one file failed to compile.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub fail_on_error: bool,

    /// Copy raw source files into the output tree before compiling them.
    /// The copy becomes the engine's recorded input path.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub copy_source_to_output: bool,

    /// External engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Source map settings.
    #[serde(default)]
    pub source_map: SourceMapConfig,
}

/// `[build.engine]` section - external compilation engine.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine command and leading arguments
    #[serde(default = "defaults::build::engine::command")]
    #[educe(Default = defaults::build::engine::command())]
    pub command: Vec<String>,

    /// Output style for the generated css
    #[serde(default)]
    pub output_style: OutputStyle,

    /// Precision for fractional numbers
    #[serde(default = "defaults::build::engine::precision")]
    #[educe(Default = defaults::build::engine::precision())]
    pub precision: u8,

    /// Emit comments indicating the corresponding source line
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub source_comments: bool,
}

/// `[build.source_map]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SourceMapConfig {
    /// Generate source map files
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Root for source map files; defaults to the css output root
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Suppress the sourceMappingURL comment in the compiled css
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub omit_url: bool,

    /// Embed the whole source map into the compiled css as a data URI
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub embed_in_css: bool,

    /// Embed source file contents in the map instead of their paths
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub embed_sources: bool,
}

impl SassConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SassConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Root under which source map files are written.
    pub fn source_map_root(&self) -> &Path {
        self.build
            .source_map
            .output
            .as_deref()
            .unwrap_or(&self.build.output)
    }

    /// Output style after substituting unsupported variants.
    ///
    /// libsass only honors `nested` and `compressed`; the other two collapse
    /// to `nested`. `validate()` warns when that happens.
    pub fn effective_output_style(&self) -> OutputStyle {
        match self.build.engine.output_style {
            OutputStyle::Expanded | OutputStyle::Compact => OutputStyle::Nested,
            style => style,
        }
    }

    /// Include paths split on `;`, tilde-expanded, empty segments dropped.
    pub fn include_paths(&self) -> Vec<PathBuf> {
        self.build
            .include_path
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| PathBuf::from(shellexpand::tilde(segment.trim()).into_owned()))
            .collect()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);

        let args = cli.build_args();
        Self::update_option(&mut self.build.input, args.input.as_ref());
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.syntax, args.syntax.as_ref());
        Self::update_option(&mut self.build.engine.output_style, args.style.as_ref());
        Self::update_option(&mut self.build.engine.precision, args.precision.as_ref());
        Self::update_option(&mut self.build.source_map.enable, args.source_map.as_ref());
        Self::update_option(&mut self.build.fail_on_error, args.fail_on_error.as_ref());
        Self::update_option(
            &mut self.build.copy_source_to_output,
            args.copy_source.as_ref(),
        );
        if let Some(map_output) = args.source_map_output.as_ref() {
            self.build.source_map.output = Some(map_output.clone());
        }

        self.update_path_with_root();
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self) {
        let root = Self::normalize_path(self.get_root());
        self.set_root(&root);

        if let Some(cli) = self.cli {
            self.config_path = Self::normalize_path(&root.join(&cli.config));
        }

        self.build.input = Self::normalize_path(&root.join(&self.build.input));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        if let Some(map_output) = self.build.source_map.output.as_ref() {
            self.build.source_map.output = Some(Self::normalize_path(&root.join(map_output)));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Log advisory warnings for contradictory settings.
    ///
    /// Never aborts: the nearest supported behavior is substituted and the
    /// run continues.
    pub fn validate(&self) {
        let map = &self.build.source_map;
        if !map.enable {
            if map.embed_in_css {
                log!("warn"; "source_map.embed_in_css=true is ignored. Cause: source_map.enable=false");
            }
            if map.embed_sources {
                log!("warn"; "source_map.embed_sources=true is ignored. Cause: source_map.enable=false");
            }
            if map.omit_url {
                log!("warn"; "source_map.omit_url=true is ignored. Cause: source_map.enable=false");
            }
        }

        let style = self.build.engine.output_style;
        if style != self.effective_output_style() {
            log!("warn"; "output_style={style} is replaced by nested. Cause: the engine only supports nested and compressed");
        }

        // Source map paths only rewrite a trailing `.scss`; indented-syntax
        // inputs keep their `.sass` name in the mapped path.
        if map.enable && self.build.syntax == InputSyntax::Sass {
            log!("warn"; "syntax=sass with source maps enabled: map paths keep the .sass file name");
        }

        if let Some(cmd) = self.build.engine.command.first() {
            if which::which(cmd).is_err() {
                log!("warn"; "`{cmd}` not found in PATH; every file will fail to compile");
            }
        } else {
            log!("warn"; "engine.command is empty; every file will fail to compile");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SassConfig::default();

        assert_eq!(config.build.input, PathBuf::from("src/main/sass"));
        assert_eq!(config.build.output, PathBuf::from("target/css"));
        assert_eq!(config.build.syntax, InputSyntax::Scss);
        assert!(config.build.fail_on_error);
        assert!(!config.build.copy_source_to_output);
        assert_eq!(config.build.engine.command, vec!["sassc".to_string()]);
        assert_eq!(config.build.engine.output_style, OutputStyle::Nested);
        assert_eq!(config.build.engine.precision, 5);
        assert!(!config.build.engine.source_comments);
        assert!(config.build.source_map.enable);
        assert!(config.build.source_map.output.is_none());
        assert!(!config.build.source_map.omit_url);
        assert!(!config.build.source_map.embed_in_css);
        assert!(!config.build.source_map.embed_sources);
    }

    #[test]
    fn test_from_str_full() {
        let config = SassConfig::from_str(
            r#"
            [build]
            input = "styles"
            output = "dist/css"
            include_path = "vendor;lib/sass"
            syntax = "sass"
            fail_on_error = false
            copy_source_to_output = true

            [build.engine]
            command = ["sassc", "--quiet"]
            output_style = "compressed"
            precision = 10
            source_comments = true

            [build.source_map]
            enable = false
            output = "dist/maps"
            omit_url = true
        "#,
        )
        .unwrap();

        assert_eq!(config.build.input, PathBuf::from("styles"));
        assert_eq!(config.build.output, PathBuf::from("dist/css"));
        assert_eq!(config.build.syntax, InputSyntax::Sass);
        assert!(!config.build.fail_on_error);
        assert!(config.build.copy_source_to_output);
        assert_eq!(config.build.engine.command, vec!["sassc", "--quiet"]);
        assert_eq!(config.build.engine.output_style, OutputStyle::Compressed);
        assert_eq!(config.build.engine.precision, 10);
        assert!(config.build.engine.source_comments);
        assert!(!config.build.source_map.enable);
        assert_eq!(
            config.build.source_map.output,
            Some(PathBuf::from("dist/maps"))
        );
        assert!(config.build.source_map.omit_url);
    }

    #[test]
    fn test_from_path_records_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sassbuild.toml");
        fs::write(&path, "[build]\ninput = \"styles\"\n").unwrap();

        let config = SassConfig::from_path(&path).unwrap();
        assert_eq!(config.config_path, path);
        assert_eq!(config.build.input, PathBuf::from("styles"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SassConfig::from_str("[build\ninput = \"styles\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result = SassConfig::from_str(
            r#"
            [build]
            unknown_field = "should_fail"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_section_rejection() {
        let result = SassConfig::from_str(
            r#"
            [watch]
            enable = true
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_source_map_root_defaults_to_output() {
        let config = SassConfig::from_str(
            r#"
            [build]
            output = "dist/css"
        "#,
        )
        .unwrap();
        assert_eq!(config.source_map_root(), Path::new("dist/css"));
    }

    #[test]
    fn test_source_map_root_override() {
        let config = SassConfig::from_str(
            r#"
            [build]
            output = "dist/css"
            [build.source_map]
            output = "dist/maps"
        "#,
        )
        .unwrap();
        assert_eq!(config.source_map_root(), Path::new("dist/maps"));
    }

    #[test]
    fn test_effective_output_style_substitution() {
        let mut config = SassConfig::default();

        config.build.engine.output_style = OutputStyle::Nested;
        assert_eq!(config.effective_output_style(), OutputStyle::Nested);

        config.build.engine.output_style = OutputStyle::Compressed;
        assert_eq!(config.effective_output_style(), OutputStyle::Compressed);

        // expanded and compact collapse to nested
        config.build.engine.output_style = OutputStyle::Expanded;
        assert_eq!(config.effective_output_style(), OutputStyle::Nested);

        config.build.engine.output_style = OutputStyle::Compact;
        assert_eq!(config.effective_output_style(), OutputStyle::Nested);
    }

    #[test]
    fn test_include_paths_split() {
        let mut config = SassConfig::default();
        config.build.include_path = Some("vendor;lib/sass; ;".into());

        let paths = config.include_paths();
        assert_eq!(
            paths,
            vec![PathBuf::from("vendor"), PathBuf::from("lib/sass")]
        );
    }

    #[test]
    fn test_include_paths_empty() {
        let config = SassConfig::default();
        assert!(config.include_paths().is_empty());
    }

    #[test]
    fn test_input_syntax_extension() {
        assert_eq!(InputSyntax::Scss.extension(), "scss");
        assert_eq!(InputSyntax::Sass.extension(), "sass");
    }

    #[test]
    fn test_output_style_display() {
        assert_eq!(OutputStyle::Nested.to_string(), "nested");
        assert_eq!(OutputStyle::Compressed.to_string(), "compressed");
    }

    #[test]
    fn test_get_root_default() {
        let config = SassConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SassConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_validate_never_panics_on_contradictions() {
        let mut config = SassConfig::default();
        config.build.source_map.enable = false;
        config.build.source_map.embed_in_css = true;
        config.build.source_map.embed_sources = true;
        config.build.source_map.omit_url = true;
        config.build.engine.output_style = OutputStyle::Expanded;
        config.build.syntax = InputSyntax::Sass;
        config.build.engine.command = vec!["definitely-not-a-real-engine".into()];

        // warnings only, never aborts
        config.validate();
    }
}
