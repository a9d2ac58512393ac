//! Structured output formatting for CLI commands.
//!
//! This module provides consistent JSON output formatting for both success
//! and error cases, ensuring machine-readable output that works well with
//! automation tools.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::io::{self, Write};

/// Version of the JSON output format
const OUTPUT_VERSION: &str = "0.1.0";

// ============================================================================
// Output Context for Quiet Mode
// ============================================================================

/// Context for controlling output verbosity
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    /// Create a new output context
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print essential output (always shown unless --json)
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print informational message (suppressed by --quiet or --json)
    pub fn print_info(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print success message (suppressed by --quiet or --json)
    pub fn print_success(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Check if JSON mode is enabled
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Safe println that handles broken pipes gracefully
fn writeln_safe(msg: &str) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Silently exit on broken pipe (expected when piping to head, etc.)
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// JSON Output Types
// ============================================================================

/// Wrapper for successful command output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    /// Create a new successful output with the given data
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            metadata: Metadata::new(command),
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrapper for error output with suggestions
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

impl JsonError {
    /// Create a new error output
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
            metadata: Metadata::new(command),
        }
    }

    /// Add details to the error
    pub fn with_details(mut self, details: Value) -> Self {
        self.error.details = Some(details);
        self
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Error detail payload
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Metadata attached to every JSON envelope
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub command: String,
    pub version: String,
    pub timestamp: String,
}

impl Metadata {
    fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            version: OUTPUT_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// Exit Codes
// ============================================================================

/// Deterministic process exit codes for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GenericError,
    InvalidArgument,
    NotFound,
    ValidationFailed,
    PermissionDenied,
    AlreadyExists,
    ExternalError,
}

impl ExitCode {
    /// Numeric process exit code
    pub fn code(&self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::GenericError => 1,
            ExitCode::InvalidArgument => 2,
            ExitCode::NotFound => 3,
            ExitCode::ValidationFailed => 4,
            ExitCode::PermissionDenied => 5,
            ExitCode::AlreadyExists => 6,
            ExitCode::ExternalError => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_envelope() {
        let output = JsonOutput::success(vec!["a", "b"], "list");
        let json = output.to_json_string().unwrap();

        assert!(json.contains("\"success\": true"));
        assert!(json.contains("\"command\": \"list\""));
        assert!(json.contains("\"a\""));
    }

    #[test]
    fn test_json_error_envelope() {
        let error = JsonError::new("not_found", "Material missing", "show")
            .with_details(serde_json::json!({"id": "ab12"}));
        let json = error.to_json_string().unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"not_found\""));
        assert!(json.contains("\"id\": \"ab12\""));
    }

    #[test]
    fn test_json_error_omits_empty_details() {
        let json = JsonError::new("x", "y", "z").to_json_string().unwrap();
        assert!(!json.contains("\"details\""));
    }

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::NotFound.code(), 3);
        assert_eq!(ExitCode::PermissionDenied.code(), 5);
        assert_eq!(ExitCode::ExternalError.code(), 10);
    }

    #[test]
    fn test_output_context_json_mode_suppresses_text() {
        let ctx = OutputContext::new(false, true);
        assert!(ctx.is_json());
        // print_data is a no-op in JSON mode; just verify it doesn't error
        ctx.print_data("hidden").unwrap();
    }
}
