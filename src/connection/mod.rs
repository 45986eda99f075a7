//! Command execution transport.
//!
//! A [`Connection`] runs one shell command at a time and returns its output.
//! The CLI device session drives Junos `cli` through it; the only shipped
//! transport is [`local::LocalConnection`], which is how on-box automation
//! reaches the device CLI.

/// Local execution connection implementation.
pub mod local;

use async_trait::async_trait;
use thiserror::Error;

pub use local::LocalConnection;

/// Errors that can occur during connection operations.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Failed to establish the connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Command execution failed (not to be confused with non-zero exit code).
    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    /// Operation timed out.
    #[error("Connection timeout after {0} seconds")]
    Timeout(u64),

    /// I/O error during connection operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Connection was closed.
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// The result of executing a command on a connection.
///
/// ```rust
/// use tfjunos::connection::CommandResult;
///
/// let result = CommandResult::success("commit complete".into(), String::new());
/// assert!(result.success);
///
/// let failed = CommandResult::failure(1, String::new(), "error: syntax error".into());
/// assert_eq!(failed.combined_output(), "error: syntax error");
/// ```
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code of the command (0 typically indicates success).
    pub exit_code: i32,
    /// Content written to standard output.
    pub stdout: String,
    /// Content written to standard error.
    pub stderr: String,
    /// Convenience flag: `true` if `exit_code == 0`.
    pub success: bool,
}

impl CommandResult {
    /// Create a new successful command result
    pub fn success(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: 0,
            stdout,
            stderr,
            success: true,
        }
    }

    /// Create a new failed command result
    pub fn failure(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            success: false,
        }
    }

    /// Get the combined output (stdout + stderr)
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

/// Options for command execution
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Timeout in seconds (None for no timeout)
    pub timeout: Option<u64>,
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Transport used by the CLI device session.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the connection identifier (hostname)
    fn identifier(&self) -> &str;

    /// Check if the connection is still alive
    async fn is_alive(&self) -> bool;

    /// Execute a command
    async fn execute(
        &self,
        command: &str,
        options: Option<ExecuteOptions>,
    ) -> ConnectionResult<CommandResult>;

    /// Close the connection
    async fn close(&self) -> ConnectionResult<()>;
}
