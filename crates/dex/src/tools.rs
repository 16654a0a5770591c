//! External tool invocation.
//!
//! The desugarer and the dex compiler are separate tools driven over their
//! command-line surfaces. Each wrapper builds the argument list, runs the
//! tool with captured output, and turns a non-zero exit status into a
//! structured error carrying the exit code and the tool's stderr.

use crate::config::ShardingConfig;
use droidbuild_core::process::{resolve_tool, run_tool};
use droidbuild_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default desugarer binary name on PATH.
pub const DESUGAR_TOOL: &str = "desugar";
/// Default dex compiler binary name on PATH.
pub const DEXBUILDER_TOOL: &str = "dexbuilder";

/// Environment override for the desugarer binary.
pub const DESUGAR_ENV: &str = "DROIDBUILD_DESUGAR";
/// Environment override for the dex compiler binary.
pub const DEXBUILDER_ENV: &str = "DROIDBUILD_DEXBUILDER";

/// Resolved locations of the external tools.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub desugar: PathBuf,
    pub dexbuilder: PathBuf,
}

impl ToolPaths {
    /// Resolve both tools from environment overrides or PATH.
    pub fn resolve() -> Result<Self> {
        Ok(Self {
            desugar: resolve_tool(DESUGAR_TOOL, DESUGAR_ENV)?,
            dexbuilder: resolve_tool(DEXBUILDER_TOOL, DEXBUILDER_ENV)?,
        })
    }

    /// Use explicit tool binaries.
    pub fn new(desugar: PathBuf, dexbuilder: PathBuf) -> Self {
        Self { desugar, dexbuilder }
    }
}

/// Desugar the configured input jar into `output_jar`.
pub fn desugar(config: &ShardingConfig, tools: &ToolPaths, output_jar: &Path) -> Result<()> {
    let mut args = vec![
        "--input".to_string(),
        config.input_jar.display().to_string(),
        "--bootclasspath_entry".to_string(),
        config.android_jar.display().to_string(),
        "--output".to_string(),
        output_jar.display().to_string(),
    ];

    if config.min_sdk_version > 0 {
        args.push("--min_sdk_version".to_string());
        args.push(config.min_sdk_version.to_string());
    }

    if config.desugar_core_libs {
        args.push("--desugar_supported_core_libs".to_string());
    }
    if let Some(lib_config) = &config.desugared_lib_config {
        args.push("--desugared_lib_config".to_string());
        args.push(lib_config.display().to_string());
    }

    for entry in &config.classpath {
        args.push("--classpath_entry".to_string());
        args.push(entry.display().to_string());
    }

    info!(input = %config.input_jar.display(), output = %output_jar.display(), "desugaring");
    check_tool_result(DESUGAR_TOOL, run_tool(&tools.desugar, &args)?)
}

/// Dex-compile `input_jar` into `output_zip`.
pub fn dexbuilder(
    config: &ShardingConfig,
    tools: &ToolPaths,
    input_jar: &Path,
    output_zip: &Path,
) -> Result<()> {
    let mut args = vec![
        "--input_jar".to_string(),
        input_jar.display().to_string(),
        "--output_zip".to_string(),
        output_zip.display().to_string(),
    ];

    if config.min_sdk_version > 0 {
        args.push("--min_sdk_version".to_string());
        args.push(config.min_sdk_version.to_string());
    }

    info!(input = %input_jar.display(), output = %output_zip.display(), "dex compiling");
    check_tool_result(DEXBUILDER_TOOL, run_tool(&tools.dexbuilder, &args)?)
}

fn check_tool_result(
    tool: &str,
    result: droidbuild_core::process::CommandResult,
) -> Result<()> {
    if result.success {
        Ok(())
    } else {
        let mut err = Error::tool_failed(tool, result.exit_code);
        let stderr = result.stderr.trim();
        if !stderr.is_empty() {
            err = err.with_context(stderr.to_string());
        }
        Err(err)
    }
}
