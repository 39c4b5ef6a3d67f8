//! External command execution.
//!
//! Runs a configured command (`Vec<String>`, first element is the program)
//! with extra arguments and captures its output. A non-zero exit becomes an
//! error carrying the command's stderr verbatim, which is exactly what the
//! engine adapter wants as a diagnostic.

use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::process::{Command, Output};

/// Execute a command and capture its output.
///
/// # Errors
/// Returns error if the command cannot be spawned or exits non-zero.
pub fn run<I, S>(cmd: &[String], args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let name = cmd.first().context("Empty command")?.clone();

    let mut command = Command::new(&cmd[0]);
    command.args(&cmd[1..]).args(args);

    let output = command
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    if !output.status.success() {
        bail!(format_error(&name, &output));
    }
    Ok(output)
}

/// Format a command failure with its stderr attached.
fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut msg = format!("Command `{name}` failed with {}", output.status);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        msg.push('\n');
        msg.push_str(stderr);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================
