//! # tfjunos - Junos configuration objects as typed resources
//!
//! tfjunos manages Junos configuration objects (sampling instances, IGMP
//! snooping VLANs, LLDP interfaces, ...) as declarative resources. Each
//! resource is a typed attribute tree that is encoded into ordered `set`
//! lines for the device and decoded back from `display set relative` output.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  CLI Interface / Lifecycle Driver                    │
//! │         (create / read / update / delete / import, diagnostics)      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                  │                                   │
//!                  ▼                                   ▼
//! ┌──────────────────────────────────┐  ┌───────────────────────────────┐
//! │       Config-Line Transcoder     │  │        Device Session         │
//! │  (attribute trees <-> set lines, │  │ (show, stage, lock, commit,   │
//! │   rules, identifier registry)    │  │  set-file output)             │
//! └──────────────────────────────────┘  └───────────────────────────────┘
//!                                                      │
//!                                                      ▼
//!                                       ┌───────────────────────────────┐
//!                                       │          Connection           │
//!                                       │    (command execution)        │
//!                                       └───────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tfjunos::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = CliSession::new(Arc::new(LocalConnection::new()), Default::default());
//!     let driver = Driver::new(Arc::new(session));
//!
//!     let planned = LldpInterface { disable: true, ..LldpInterface::named("ge-0/0/1") };
//!     let created = driver.create(&planned).await?;
//!     assert_eq!(created, planned);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::connection::{CommandResult, Connection, ConnectionError, LocalConnection};
    pub use crate::error::{Error, Result};
    pub use crate::lifecycle::{Diagnostic, Diagnostics, Driver, FakeSetFile, Resource};
    pub use crate::resources::{IgmpSnoopingVlan, LldpInterface, ResourceKind, SamplingInstance};
    pub use crate::session::{CliSession, CliSessionOptions, Session, SessionError, SetFileSession};
    pub use crate::transcoder::{Attr, AttributePath, Transcode, TranscodeError};
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases.
///
/// [`Error`](error::Error) wraps transcoder and session failures together
/// with the lifecycle errors (not found, already exists, bad import id).
pub mod error;

/// Typed attribute trees and their `set` line encoding.
pub mod transcoder;

// ============================================================================
// Device Access
// ============================================================================

/// Command execution transport.
pub mod connection;

/// Device sessions: show commands and configuration transactions.
pub mod session;

// ============================================================================
// Resources
// ============================================================================

/// Resource trait, lifecycle driver and diagnostics.
pub mod lifecycle;

/// Resource types.
pub mod resources;

// ============================================================================
// Ambient
// ============================================================================

/// Configuration file and environment loading.
pub mod config;

/// Logging setup.
pub mod telemetry;

pub use error::{Error, Result};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
