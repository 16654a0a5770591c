//! External tool execution
//!
//! Provides a unified interface for running the external build tools
//! (desugarer, dex compiler) with output capture. Tools report failure
//! through their exit status; callers decide how to propagate it. Nothing
//! here terminates the process on a callee's behalf.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Result of a tool invocation
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the tool succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the tool
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Run a tool and capture its output
pub fn run_tool(program: &Path, args: &[String]) -> Result<CommandResult> {
    debug!(tool = %program.display(), ?args, "invoking external tool");

    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            Error::io(format!("Failed to execute {}: {}", program.display(), e))
        })?;

    Ok(CommandResult::from_output(output))
}

/// Resolve a tool binary.
///
/// An explicit environment override wins; otherwise the tool name is looked
/// up on PATH.
pub fn resolve_tool(name: &str, env_override: &str) -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(env_override) {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(Error::tool_not_found(name)
                .with_context(format!("{} points to {}", env_override, path.display())));
        }
        return Ok(path);
    }

    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Check if a tool exists on PATH
pub fn tool_exists(name: &str) -> bool {
    which::which(name).is_ok()
}
