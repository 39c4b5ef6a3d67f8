//! Logging utilities with colored module prefixes.
//!
//! Provides the `log!` macro for formatted terminal output:
//!
//! ```ignore
//! log!("build"; "Compiled {} files", count);
//! log!("error"; "{}: invalid property", path.display());
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_bracketed() {
        // colored may strip escapes when not a tty; the text itself must keep
        // the bracket form either way
        let prefix = colorize_prefix("build");
        assert!(prefix.to_string().contains("[build]"));
    }

    #[test]
    fn test_prefix_case_insensitive_match() {
        let lower = colorize_prefix("error");
        let upper = colorize_prefix("ERROR");
        assert!(lower.to_string().contains("[error]"));
        assert!(upper.to_string().contains("[ERROR]"));
    }
}
