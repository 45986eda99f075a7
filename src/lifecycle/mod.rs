//! Resource lifecycle.
//!
//! A [`Resource`] ties an attribute tree to its place in the device
//! configuration. [`Driver`] runs Create / Read / Update / Delete / Import
//! against a device session, using the transcoder for each conversion.

pub mod diagnostics;
pub mod driver;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use driver::{Driver, FakeSetFile};

use crate::error::Result;
use crate::session::Session;
use crate::transcoder::{
    self, line::DELETE_LS, Transcode, TranscodeResult, PIPE_DISPLAY_SET_RELATIVE, SHOW_CONFIG,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A configuration object managed as one unit.
pub trait Resource:
    Transcode + Default + Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Resource type name, used in commit messages and errors.
    const TYPE_NAME: &'static str;

    /// Accepted import id shape, shown when an import finds nothing.
    const IMPORT_ID_FORMAT: &'static str;

    /// Resource id.
    fn id(&self) -> String;

    /// Tree carrying only the identity fields of `id`.
    fn from_import_id(id: &str) -> Result<Self>;

    /// Copy of the identity fields, with everything else unset.
    fn identity(&self) -> Self;

    /// Configuration path of the resource, qualified by its routing instance.
    fn show_path(&self) -> String;

    /// Prefix of every `set` line of the resource.
    fn set_prefix(&self) -> String {
        format!("{}{} ", transcoder::line::SET_LS, self.show_path())
    }

    /// Qualifying routing instance, when the resource lives inside one.
    fn routing_instance(&self) -> Option<&str> {
        None
    }

    /// Lines removing the whole resource.
    fn delete_lines(&self) -> Vec<String> {
        vec![format!("{}{}", DELETE_LS, self.show_path())]
    }

    /// Lines removing only the options of the resource, for partial update.
    fn delete_options_lines(&self) -> Option<Vec<String>> {
        None
    }
}

/// Lines configuring `tree`.
///
/// A tree without any option still produces the bare stanza line so the
/// object exists on the device.
pub fn set_lines<R: Resource>(tree: &R) -> TranscodeResult<Vec<String>> {
    let prefix = tree.set_prefix();
    let mut lines = transcoder::encode(tree, &prefix)?;
    if lines.is_empty() {
        lines.push(prefix.trim_end().to_string());
    }
    Ok(lines)
}

/// Show command reading the resource at `show_path`.
pub fn show_command(show_path: &str) -> String {
    format!("{}{}{}", SHOW_CONFIG, show_path, PIPE_DISPLAY_SET_RELATIVE)
}

/// Read the resource identified by `identity`.
///
/// Returns `None` when the device has no configuration at its path.
pub async fn read<R: Resource>(session: &dyn Session, identity: &R) -> Result<Option<R>> {
    let output = session.command(&show_command(&identity.show_path())).await?;
    if transcoder::is_empty_output(&output) {
        return Ok(None);
    }
    let mut tree = identity.identity();
    transcoder::decode_into(&mut tree, &output, &identity.set_prefix())?;
    Ok(Some(tree))
}

/// Validate `tree` without touching a device.
pub fn validate<R: Resource>(tree: &R) -> Diagnostics {
    transcoder::validate(tree).iter().collect()
}
