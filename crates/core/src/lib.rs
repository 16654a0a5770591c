//! Core utilities for Droidbuild action binaries
//!
//! This crate provides shared functionality used across the action tools:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Process execution**: external tool invocation with captured output
//! - **Flag files**: parameter-file expansion and flag normalization
//!
//! # Example
//!
//! ```rust,no_run
//! use droidbuild_core::flagfile;
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let args = flagfile::expand_args(args).expect("Failed to expand flag file");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod flagfile;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::process::CommandResult;
}
