//! Structured error handling for the action binaries
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Unknown = 1000,
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    InvalidPath = 2003,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    MissingFlag = 3001,
    InvalidFlagValue = 3002,
    FlagfileError = 3003,

    // Archive errors (4xxx)
    ArchiveError = 4000,
    ArchiveOpenFailed = 4001,
    ArchiveWriteFailed = 4002,
    InvalidEntryName = 4003,

    // External tool errors (5xxx)
    ToolError = 5000,
    ToolNotFound = 5001,
    ToolFailed = 5002,

    // Validation errors (6xxx)
    ValidationError = 6000,
    ShardCountOutOfRange = 6001,
    NotEnoughOutputs = 6002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Archive",
            5 => "Tool",
            6 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn missing_flag(flag: &str) -> Self {
        Self::new(ErrorCode::MissingFlag, format!("{} is required", flag))
    }

    pub fn flagfile(path: impl AsRef<std::path::Path>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::FlagfileError,
            format!(
                "Failed to read flag file {}: {}",
                path.as_ref().display(),
                message.into()
            ),
        )
        .with_suggestion("Check that the flag file exists and contains one argument per line")
    }

    pub fn archive(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArchiveError, message)
    }

    pub fn archive_open(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ArchiveOpenFailed,
            format!("Failed to open zip file: {}", path.as_ref().display()),
        )
    }

    pub fn tool_not_found(tool: &str) -> Self {
        Self::new(ErrorCode::ToolNotFound, format!("Tool not found: {}", tool))
            .with_suggestion(format!("Install {} and ensure it's in your PATH", tool))
    }

    pub fn tool_failed(tool: &str, exit_code: i32) -> Self {
        Self::new(
            ErrorCode::ToolFailed,
            format!("{} failed with exit code: {}", tool, exit_code),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn shard_count_out_of_range(count: usize) -> Self {
        Self::new(
            ErrorCode::ShardCountOutOfRange,
            format!("{} is an unreasonable shard count (want [1 to 256])", count),
        )
        .with_suggestion("Pass between 1 and 256 output paths via -out")
    }
}

/// Serializable error report for logging and diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for the action binaries
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const ARCHIVE_ERROR: i32 = 4;
    pub const TOOL_ERROR: i32 = 5;
    pub const COMMAND_NOT_FOUND: i32 = 127;
}

impl Error {
    /// Map the error to a process exit code
    pub fn exit_code(&self) -> i32 {
        match self.code.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            4 => exit_codes::ARCHIVE_ERROR,
            5 => {
                if self.code == ErrorCode::ToolNotFound {
                    exit_codes::COMMAND_NOT_FOUND
                } else {
                    exit_codes::TOOL_ERROR
                }
            }
            6 => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
