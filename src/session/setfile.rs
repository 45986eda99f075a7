//! Session writing staged lines to a local file instead of a device.

use super::{Session, SessionError, SessionResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Appends every committed batch to a set file.
///
/// Show commands return an empty reply, so every resource reads as absent.
#[derive(Debug)]
pub struct SetFileSession {
    path: PathBuf,
    pending: Mutex<Vec<String>>,
}

impl SetFileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, lines: &[String]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let mut buf = String::new();
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }
        file.write_all(buf.as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl Session for SetFileSession {
    async fn command(&self, _cli: &str) -> SessionResult<String> {
        Ok(String::new())
    }

    async fn config_set(&self, lines: &[String]) -> SessionResult<()> {
        self.pending.lock().extend_from_slice(lines);
        Ok(())
    }

    async fn config_lock(&self) -> SessionResult<()> {
        Ok(())
    }

    async fn config_unlock(&self) -> SessionResult<()> {
        Ok(())
    }

    async fn commit_conf(&self, message: &str) -> SessionResult<()> {
        let lines = std::mem::take(&mut *self.pending.lock());
        self.append(&lines).await.map_err(|source| SessionError::SetFile {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), lines = lines.len(), message = %message, "Lines written to set file");
        Ok(())
    }

    async fn config_clear(&self) -> SessionResult<()> {
        self.pending.lock().clear();
        Ok(())
    }
}
