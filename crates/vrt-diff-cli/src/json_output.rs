//! JSON output types for machine-readable CLI output.
//!
//! With `--json`, the diff command prints a single document on stdout so CI
//! tooling can consume verdicts without scraping console lines.

use serde::{Deserialize, Serialize};

/// Error codes for fatal CLI errors.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Config file could not be read
    pub const CONFIG_READ: &str = "VRT_001";
    /// Config file is not valid JSON or has wrongly-typed values
    pub const CONFIG_PARSE: &str = "VRT_002";
    /// A config value is out of range
    pub const CONFIG_INVALID: &str = "VRT_003";
    /// Current directory is missing or not a directory
    pub const CURRENT_DIR: &str = "VRT_004";
    /// Output directory could not be created
    pub const OUTPUT_DIR: &str = "VRT_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "VRT_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Path involved in the error (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}
