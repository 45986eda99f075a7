//! Create / Read / Update / Delete / Import orchestration.

use super::{read, set_lines, show_command, Resource};
use crate::error::{Error, Result};
use crate::session::{Session, SetFileSession};
use crate::transcoder::{self, line::quote, line::DEFAULT_ROUTING_INSTANCE};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Routing of write operations to a set file instead of the device.
#[derive(Debug)]
pub struct FakeSetFile {
    session: SetFileSession,
    /// Also route updates to the set file.
    pub update_also: bool,
    /// Also route deletes to the set file.
    pub delete_also: bool,
}

impl FakeSetFile {
    pub fn new(path: impl Into<PathBuf>, update_also: bool, delete_also: bool) -> Self {
        Self {
            session: SetFileSession::new(path),
            update_also,
            delete_also,
        }
    }
}

/// Runs resource operations against one device session.
pub struct Driver {
    session: Arc<dyn Session>,
    fake: Option<FakeSetFile>,
}

impl Driver {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            session,
            fake: None,
        }
    }

    /// Route creates (and optionally updates / deletes) to a set file.
    pub fn with_set_file(mut self, fake: FakeSetFile) -> Self {
        self.fake = Some(fake);
        self
    }

    fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    /// Create the resource and return it as read back from the device.
    #[instrument(skip_all, fields(resource = R::TYPE_NAME, id = %planned.id()))]
    pub async fn create<R: Resource>(&self, planned: &R) -> Result<R> {
        check(planned)?;
        let message = commit_message("create", R::TYPE_NAME);

        if let Some(fake) = &self.fake {
            write_set_file(&fake.session, set_lines(planned)?, &message).await?;
            return Ok(planned.clone());
        }

        let session = self.session();
        session.config_lock().await?;
        let outcome = async {
            check_routing_instance(session, planned).await?;
            if read(session, &planned.identity()).await?.is_some() {
                return Err(Error::already_exists(R::TYPE_NAME, planned.id()));
            }
            session.config_set(&set_lines(planned)?).await?;
            session.commit_conf(&message).await?;
            Ok::<(), Error>(())
        }
        .await;
        close_transaction(session, outcome.is_err()).await;
        outcome?;

        let created = read(session, &planned.identity())
            .await?
            .ok_or_else(|| not_found_after_commit::<R>(planned))?;
        info!("resource created");
        Ok(created)
    }

    /// Current state of the resource, `None` when it is gone.
    #[instrument(skip_all, fields(resource = R::TYPE_NAME, id = %identity.id()))]
    pub async fn read<R: Resource>(&self, identity: &R) -> Result<Option<R>> {
        let state = read(self.session(), identity).await?;
        if state.is_none() {
            debug!("resource not found, removing from state");
        }
        Ok(state)
    }

    /// Replace the configuration of `prior` with `planned`.
    #[instrument(skip_all, fields(resource = R::TYPE_NAME, id = %planned.id()))]
    pub async fn update<R: Resource>(&self, prior: &R, planned: &R) -> Result<R> {
        check(planned)?;
        let message = commit_message("update", R::TYPE_NAME);
        let mut lines = planned
            .delete_options_lines()
            .unwrap_or_else(|| prior.delete_lines());
        lines.extend(set_lines(planned)?);

        if let Some(fake) = self.fake.as_ref().filter(|f| f.update_also) {
            write_set_file(&fake.session, lines, &message).await?;
            return Ok(planned.clone());
        }

        let session = self.session();
        session.config_lock().await?;
        let outcome = async {
            check_routing_instance(session, planned).await?;
            session.config_set(&lines).await?;
            session.commit_conf(&message).await?;
            Ok::<(), Error>(())
        }
        .await;
        close_transaction(session, outcome.is_err()).await;
        outcome?;

        let updated = read(session, &planned.identity())
            .await?
            .ok_or_else(|| not_found_after_commit::<R>(planned))?;
        info!("resource updated");
        Ok(updated)
    }

    /// Remove the resource.
    #[instrument(skip_all, fields(resource = R::TYPE_NAME, id = %state.id()))]
    pub async fn delete<R: Resource>(&self, state: &R) -> Result<()> {
        let message = commit_message("delete", R::TYPE_NAME);
        let lines = state.delete_lines();

        if let Some(fake) = self.fake.as_ref().filter(|f| f.delete_also) {
            return write_set_file(&fake.session, lines, &message).await;
        }

        let session = self.session();
        session.config_lock().await?;
        let outcome = async {
            session.config_set(&lines).await?;
            session.commit_conf(&message).await?;
            Ok::<(), Error>(())
        }
        .await;
        close_transaction(session, outcome.is_err()).await;
        outcome?;
        info!("resource deleted");
        Ok(())
    }

    /// Adopt an existing resource by id.
    #[instrument(skip(self))]
    pub async fn import<R: Resource>(&self, id: &str) -> Result<R> {
        let identity = R::from_import_id(id)?;
        read(self.session(), &identity).await?.ok_or_else(|| {
            Error::not_found(
                R::TYPE_NAME,
                id,
                format!("not found (id must be {})", R::IMPORT_ID_FORMAT),
            )
        })
    }
}

fn not_found_after_commit<R: Resource>(tree: &R) -> Error {
    Error::not_found(
        R::TYPE_NAME,
        tree.id(),
        "not exists after commit => check your config",
    )
}

fn commit_message(operation: &str, type_name: &str) -> String {
    format!("{} resource {}", operation, type_name)
}

/// First rule violation of `tree`, as an error.
fn check<R: Resource>(tree: &R) -> Result<()> {
    match transcoder::validate(tree).into_iter().next() {
        Some(violation) => Err(violation.into()),
        None => Ok(()),
    }
}

async fn check_routing_instance<R: Resource>(session: &dyn Session, tree: &R) -> Result<()> {
    let Some(instance) = tree.routing_instance() else {
        return Ok(());
    };
    if instance.is_empty() || instance == DEFAULT_ROUTING_INSTANCE {
        return Ok(());
    }
    let path = format!("routing-instances {}", quote(instance));
    let output = session.command(&show_command(&path)).await?;
    if transcoder::is_empty_output(&output) {
        return Err(Error::RoutingInstanceNotFound(instance.to_string()));
    }
    Ok(())
}

/// Unlock, discarding staged lines first when the operation failed.
async fn close_transaction(session: &dyn Session, failed: bool) {
    if failed {
        if let Err(e) = session.config_clear().await {
            warn!(error = %e, "failed to clear pending configuration");
        }
    }
    if let Err(e) = session.config_unlock().await {
        warn!(error = %e, "failed to unlock configuration");
    }
}

async fn write_set_file(session: &SetFileSession, lines: Vec<String>, message: &str) -> Result<()> {
    session.config_set(&lines).await?;
    session.commit_conf(message).await?;
    Ok(())
}
