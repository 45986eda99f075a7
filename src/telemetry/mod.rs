//! Logging for the library and the `tfjunos` binary.
//!
//! Output goes to stderr so that encoded lines on stdout stay clean.
//! `RUST_LOG` overrides the configured level.
//!
//! ```rust,ignore
//! use tfjunos::telemetry::{LogFormat, LoggingBuilder};
//!
//! LoggingBuilder::new().with_format(LogFormat::Json).init()?;
//! tracing::info!(resource = "junos_lldp_interface", "created");
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, LogLevel, LoggingConfig};
pub use logging::{init_from_verbosity, LoggingBuilder};
