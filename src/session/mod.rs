//! Device sessions.
//!
//! A [`Session`] runs show commands and stages configuration lines into a
//! transaction bounded by lock / commit / unlock. Calls are awaited strictly
//! in sequence; a session carries at most one transaction at a time.

pub mod cli;
pub mod setfile;

use crate::connection::ConnectionError;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub use cli::{CliSession, CliSessionOptions};
pub use setfile::SetFileSession;

/// Transport-level failures.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The device rejected a command.
    #[error("command '{command}' failed: {output}")]
    CommandFailed { command: String, output: String },

    /// The device refused the staged configuration.
    #[error("commit failed: {0}")]
    CommitFailed(String),

    #[error("a configuration transaction is already open on this session")]
    AlreadyLocked,

    #[error("no configuration transaction is open on this session")]
    NotLocked,

    #[error("failed to write set file {path}: {source}")]
    SetFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Channel to a managed device.
#[async_trait]
pub trait Session: Send + Sync {
    /// Run a read-only command and return the raw reply.
    async fn command(&self, cli: &str) -> SessionResult<String>;

    /// Stage `set` / `delete` lines into the open transaction.
    async fn config_set(&self, lines: &[String]) -> SessionResult<()>;

    /// Open a transaction.
    async fn config_lock(&self) -> SessionResult<()>;

    /// Close the transaction.
    async fn config_unlock(&self) -> SessionResult<()>;

    /// Apply staged lines with a commit log message.
    async fn commit_conf(&self, message: &str) -> SessionResult<()>;

    /// Discard staged lines.
    async fn config_clear(&self) -> SessionResult<()>;
}
