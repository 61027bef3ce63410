use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::application::dto::CollectResponse;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a complete collection
/// from a partial one and from outright failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every module was processed
    Success = 0,
    /// Collection was cancelled or hit its deadline; partial output was still written
    Interrupted = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid project, config or output failure)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Interrupted => write!(f, "Interrupted (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for build-info extraction.
#[derive(Debug, Error)]
pub enum GradleBuildInfoError {
    #[error("Invalid working directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify the root directory of a Gradle project")]
    InvalidWorkingDirectory { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to parse artifact manifest: {details}")]
    ManifestParseError { details: String },

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },
}

/// Failure of a single build-tool invocation.
///
/// Timeouts and non-zero exits are separate kinds so callers can tell a hung
/// Gradle daemon from a failing build.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to start `{command}`: {details}")]
    Spawn { command: String, details: String },

    #[error("Command `{command}` timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("Command `{command}` exited with {}", code.map(|c| format!("status {c}")).unwrap_or_else(|| "a signal".to_string()))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

impl CommandError {
    pub fn command(&self) -> &str {
        match self {
            CommandError::Spawn { command, .. }
            | CommandError::Timeout { command, .. }
            | CommandError::NonZeroExit { command, .. } => command,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CommandError::Timeout { .. })
    }
}

/// Rejection raised by the path sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    #[error("path component is empty")]
    EmptyComponent,

    #[error("path component '{0}' contains a parent-directory reference")]
    TraversalComponent(String),

    #[error("path component '{0}' is absolute")]
    AbsoluteComponent(String),

    #[error("path component '{0}' contains a path separator")]
    SeparatorInComponent(String),

    #[error("{path} escapes sandbox base {base}")]
    OutsideBase { path: PathBuf, base: PathBuf },
}

/// Terminal status of a collection call that did not run to completion.
///
/// Both variants carry every module that was fully processed before the
/// interruption was observed.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Collection cancelled after {} module(s)", partial.modules.len())]
    Cancelled { partial: Box<CollectResponse> },

    #[error("Collection deadline of {}s exceeded after {} module(s)", deadline.as_secs(), partial.modules.len())]
    DeadlineExceeded {
        deadline: Duration,
        partial: Box<CollectResponse>,
    },
}

impl CollectError {
    /// Returns the partial result accumulated before the interruption.
    pub fn into_partial(self) -> CollectResponse {
        match self {
            CollectError::Cancelled { partial } | CollectError::DeadlineExceeded { partial, .. } => {
                *partial
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Interrupted.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::Interrupted), "Interrupted (1)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_invalid_working_directory_display() {
        let error = GradleBuildInfoError::InvalidWorkingDirectory {
            path: PathBuf::from("/invalid/path"),
            reason: "Directory does not exist".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid working directory"));
        assert!(display.contains("/invalid/path"));
        assert!(display.contains("Directory does not exist"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_timeout_is_distinct_from_non_zero_exit() {
        let timeout = CommandError::Timeout {
            command: "gradle dependencies".to_string(),
            timeout: Duration::from_secs(30),
        };
        let failed = CommandError::NonZeroExit {
            command: "gradle dependencies".to_string(),
            code: Some(1),
            output: "BUILD FAILED".to_string(),
        };

        assert!(timeout.is_timeout());
        assert!(!failed.is_timeout());
        assert_eq!(timeout.command(), "gradle dependencies");
        assert!(timeout.to_string().contains("timed out after 30s"));
        assert!(failed.to_string().contains("status 1"));
    }

    #[test]
    fn test_sandbox_error_display() {
        let error = SandboxError::TraversalComponent("..".to_string());
        assert!(error.to_string().contains("parent-directory"));
    }

    #[test]
    fn test_collect_error_keeps_partial_result() {
        let error = CollectError::Cancelled {
            partial: Box::new(CollectResponse::new(Vec::new(), 0)),
        };
        assert!(error.to_string().contains("cancelled after 0 module(s)"));
        let partial = error.into_partial();
        assert!(partial.modules.is_empty());
    }
}
