//! Parameter-file (flag file) resolution
//!
//! Build systems pass long argument lists through a parameter file. When
//! the sole first argument is `-flagfile=<path>`, the file's lines replace
//! the entire argument list, one argument per line.

use crate::error::{Error, Result};
use std::path::Path;

const FLAGFILE_PREFIX: &str = "-flagfile=";

/// Expand a `-flagfile=` argument into the full argument list.
///
/// If the first argument carries the flag file prefix, the returned list is
/// exactly the file's lines; every other original argument is discarded.
/// Otherwise the arguments are returned unchanged.
pub fn expand_args(args: Vec<String>) -> Result<Vec<String>> {
    match args.first() {
        Some(first) if first.starts_with(FLAGFILE_PREFIX) => {
            let path = Path::new(&first[FLAGFILE_PREFIX.len()..]);
            let contents = std::fs::read_to_string(path)
                .map_err(|e| Error::flagfile(path, e.to_string()))?;
            Ok(contents.lines().map(str::to_string).collect())
        }
        _ => Ok(args),
    }
}

/// Rewrite single-dash long flags to the double-dash form.
///
/// The action's documented surface uses `-android_jar`-style flags. The
/// argument parser wants `--android_jar`, so any argument whose name (the
/// part before an optional `=`) matches a known flag gets a second dash.
/// Arguments already in `--` form, and positional values, pass through.
pub fn normalize_single_dash_flags(args: Vec<String>, known_flags: &[&str]) -> Vec<String> {
    args.into_iter()
        .map(|arg| {
            if !arg.starts_with('-') || arg.starts_with("--") {
                return arg;
            }
            let name = &arg[1..];
            let name = name.split('=').next().unwrap_or(name);
            if known_flags.contains(&name) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}
