//! Device session over the Junos `cli` binary.
//!
//! Show commands run as `cli -c '<command> | no-more'`. Staged lines are
//! written to a temporary file on commit and loaded inside a single
//! `configure exclusive` script.

use super::{Session, SessionError, SessionResult};
use crate::connection::{CommandResult, Connection, ExecuteOptions};
use crate::transcoder::{XML_END_COMMAND, XML_START_COMMAND};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Directory holding the staged set files during commit.
const STAGING_DIR: &str = "/var/tmp";

/// Counter for staged set file names.
static STAGING_COUNTER: AtomicU32 = AtomicU32::new(1);

fn next_staging_file() -> String {
    format!(
        "{}/tfjunos_{}_{}.set",
        STAGING_DIR,
        std::process::id(),
        STAGING_COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// Quote a string for `sh -c`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Options for [`CliSession`].
#[derive(Debug, Clone, Default)]
pub struct CliSessionOptions {
    /// Pause after opening a transaction, in milliseconds.
    pub sleep_lock: u64,
    /// Commit with `commit confirmed <minutes>` then confirm.
    pub commit_confirmed: Option<u32>,
    /// Timeout for each command, in seconds.
    pub command_timeout: Option<u64>,
}

#[derive(Debug, Default)]
struct Transaction {
    open: bool,
    pending: Vec<String>,
}

/// Session driving the device CLI through a [`Connection`].
pub struct CliSession {
    connection: Arc<dyn Connection>,
    options: CliSessionOptions,
    transaction: Mutex<Transaction>,
}

impl CliSession {
    pub fn new(connection: Arc<dyn Connection>, options: CliSessionOptions) -> Self {
        Self {
            connection,
            options,
            transaction: Mutex::new(Transaction::default()),
        }
    }

    /// Lines staged in the open transaction.
    pub fn pending(&self) -> Vec<String> {
        self.transaction.lock().pending.clone()
    }

    pub fn is_locked(&self) -> bool {
        self.transaction.lock().open
    }

    fn execute_options(&self) -> Option<ExecuteOptions> {
        self.options
            .command_timeout
            .map(|t| ExecuteOptions::new().with_timeout(t))
    }

    async fn execute(&self, command: &str) -> SessionResult<CommandResult> {
        debug!(host = %self.connection.identifier(), command = %command, "Executing device command");
        Ok(self
            .connection
            .execute(command, self.execute_options())
            .await?)
    }

    /// Remove a staged set file; failures are logged and never mask the commit result.
    async fn remove_staging(&self, staging: &str) {
        match self.execute(&format!("rm -f {}", staging)).await {
            Ok(result) if result.success => {}
            Ok(result) => warn!(
                host = %self.connection.identifier(),
                file = %staging,
                exit_code = result.exit_code,
                output = %result.combined_output().trim(),
                "failed to remove staged set file"
            ),
            Err(e) => warn!(
                host = %self.connection.identifier(),
                file = %staging,
                error = %e,
                "failed to remove staged set file"
            ),
        }
    }

    /// Commit statements for the configured commit mode.
    fn commit_statements(&self, message: &str) -> Vec<String> {
        let comment = format!("comment \"{}\"", message.replace('"', r#"\""#));
        match self.options.commit_confirmed {
            Some(minutes) => vec![
                format!("commit confirmed {} {}", minutes, comment),
                "commit".to_string(),
            ],
            None => vec![format!("commit {}", comment)],
        }
    }
}

#[async_trait]
impl Session for CliSession {
    async fn command(&self, cli: &str) -> SessionResult<String> {
        let script = format!("cli -c {}", shell_quote(&format!("{} | no-more", cli)));
        let result = self.execute(&script).await?;
        if !result.success {
            return Err(SessionError::CommandFailed {
                command: cli.to_string(),
                output: result.combined_output(),
            });
        }
        Ok(format!(
            "{}\n{}\n{}",
            XML_START_COMMAND, result.stdout, XML_END_COMMAND
        ))
    }

    async fn config_set(&self, lines: &[String]) -> SessionResult<()> {
        let mut transaction = self.transaction.lock();
        if !transaction.open {
            return Err(SessionError::NotLocked);
        }
        for line in lines {
            debug!(line = %line, "Staging configuration line");
        }
        transaction.pending.extend_from_slice(lines);
        Ok(())
    }

    async fn config_lock(&self) -> SessionResult<()> {
        {
            let mut transaction = self.transaction.lock();
            if transaction.open {
                return Err(SessionError::AlreadyLocked);
            }
            transaction.open = true;
            transaction.pending.clear();
        }
        if self.options.sleep_lock > 0 {
            tokio::time::sleep(Duration::from_millis(self.options.sleep_lock)).await;
        }
        Ok(())
    }

    async fn config_unlock(&self) -> SessionResult<()> {
        let mut transaction = self.transaction.lock();
        transaction.open = false;
        transaction.pending.clear();
        Ok(())
    }

    async fn commit_conf(&self, message: &str) -> SessionResult<()> {
        let lines = {
            let mut transaction = self.transaction.lock();
            if !transaction.open {
                return Err(SessionError::NotLocked);
            }
            std::mem::take(&mut transaction.pending)
        };
        if lines.is_empty() {
            debug!("Nothing staged, skipping commit");
            return Ok(());
        }

        let staging = next_staging_file();
        let mut content = lines.join("\n");
        content.push('\n');
        let write = self
            .execute(&format!("printf '%s' {} > {}", shell_quote(&content), staging))
            .await?;
        if !write.success {
            return Err(SessionError::CommandFailed {
                command: format!("write {}", staging),
                output: write.combined_output(),
            });
        }

        let mut statements = vec![
            "configure exclusive".to_string(),
            format!("load set {}", staging),
        ];
        statements.extend(self.commit_statements(message));
        statements.push("exit".to_string());
        let script = format!("cli -c {}", shell_quote(&statements.join("; ")));
        let result = self.execute(&script).await;
        self.remove_staging(&staging).await;

        let result = result?;
        let output = result.combined_output();
        if output.contains("error:") || !output.contains("commit complete") {
            return Err(SessionError::CommitFailed(output.trim().to_string()));
        }
        info!(host = %self.connection.identifier(), lines = lines.len(), message = %message, "Configuration committed");
        Ok(())
    }

    async fn config_clear(&self) -> SessionResult<()> {
        self.transaction.lock().pending.clear();
        Ok(())
    }
}
