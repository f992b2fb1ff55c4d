//! Error types for OVSDB management operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. The first three
//! variants together describe a failure of an external tool invocation; see
//! [`OvsdbError::is_external_tool_error`].

use std::io;
use thiserror::Error;

/// Result type alias for OVSDB management operations.
pub type OvsdbResult<T> = Result<T, OvsdbError>;

/// Errors that can occur while driving the OVS/OVN command line tools.
#[derive(Debug, Error)]
pub enum OvsdbError {
    /// The program could not be found on the system.
    #[error("Command not found: '{command}'")]
    ToolNotFound {
        /// The command line that was attempted.
        command: String,
    },

    /// Failed to spawn the program for a reason other than it being absent.
    #[error("Failed to execute command '{command}': {source}")]
    ShellExec {
        /// The command line that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Command ran but returned a non-zero exit code.
    #[error("Command failed: '{command}' (exit code {exit_code}): {output}")]
    CommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code, -1 if the process was killed by a signal.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// Command succeeded but its output could not be decoded.
    #[error("Malformed output from '{command}': {message}")]
    MalformedOutput {
        /// The command whose output was rejected.
        command: String,
        /// What was wrong with it.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// IO error outside of command execution (e.g. reading a config file).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl OvsdbError {
    /// Creates a malformed output error.
    pub fn malformed_output(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the external tool could not be run or exited non-zero.
    pub fn is_external_tool_error(&self) -> bool {
        matches!(
            self,
            OvsdbError::ToolNotFound { .. }
                | OvsdbError::ShellExec { .. }
                | OvsdbError::CommandFailed { .. }
        )
    }

    /// Returns the exit code of a failed command, if that is what this is.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            OvsdbError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}
