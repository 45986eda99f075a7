//! Configuration for tfjunos
//!
//! Handles loading configuration from these sources, lowest priority first:
//! - Default values
//! - System configuration (/etc/tfjunos/tfjunos.toml)
//! - User configuration (~/.tfjunos.toml)
//! - Project configuration (./tfjunos.toml)
//! - Environment variables (`JUNOS_*`, as read by the Terraform provider)
//! - Command-line arguments

use crate::session::CliSessionOptions;
use crate::telemetry::LoggingConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device and session settings
    pub provider: ProviderConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Device and session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Remote device address.
    ///
    /// Sessions run the device `cli` on the local host, so a remote address
    /// is rejected by [`Config::validate`].
    pub host: Option<String>,

    /// Pause after taking the configuration lock, in milliseconds
    pub sleep_lock: u64,

    /// Minutes for `commit confirmed`, if any
    pub commit_confirmed: Option<u32>,

    /// Write create lines to this file instead of committing them
    pub fake_create_with_setfile: Option<PathBuf>,

    /// Also route updates to the set file
    pub fake_update_also: bool,

    /// Also route deletes to the set file
    pub fake_delete_also: bool,

    /// Timeout for each device command, in seconds
    pub command_timeout: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: None,
            sleep_lock: 10,
            commit_confirmed: None,
            fake_create_with_setfile: None,
            fake_update_also: false,
            fake_delete_also: false,
            command_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Files are not merged: the last existing file wins, then the
    /// environment is applied on top.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = Self::from_file(&path)?;
            }
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Get the list of configuration file paths to check, lowest priority first
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }
        if let Ok(env_config) = std::env::var("TFJUNOS_CONFIG") {
            return vec![PathBuf::from(env_config)];
        }

        let mut paths = vec![PathBuf::from("/etc/tfjunos/tfjunos.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tfjunos.toml"));
        }
        paths.push(PathBuf::from("tfjunos.toml"));
        paths
    }

    /// Load from a specific file; the format follows the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        let provider = &mut self.provider;

        if let Ok(host) = std::env::var("JUNOS_HOST") {
            provider.host = Some(host);
        }
        if let Ok(sleep) = std::env::var("JUNOS_SLEEP_LOCK") {
            provider.sleep_lock = sleep
                .parse()
                .with_context(|| format!("JUNOS_SLEEP_LOCK is not a number: {}", sleep))?;
        }
        if let Ok(minutes) = std::env::var("JUNOS_COMMIT_CONFIRMED") {
            provider.commit_confirmed = Some(minutes.parse().with_context(|| {
                format!("JUNOS_COMMIT_CONFIRMED is not a number: {}", minutes)
            })?);
        }
        if let Ok(file) = std::env::var("JUNOS_FAKECREATE_SETFILE") {
            provider.fake_create_with_setfile = Some(PathBuf::from(file));
        }
        if let Ok(value) = std::env::var("JUNOS_FAKEUPDATE_ALSO") {
            provider.fake_update_also = parse_flag(&value);
        }
        if let Ok(value) = std::env::var("JUNOS_FAKEDELETE_ALSO") {
            provider.fake_delete_also = parse_flag(&value);
        }
        Ok(())
    }

    /// Reject combinations the provider cannot run with
    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider;
        if let Some(host) = provider.host.as_deref().filter(|h| !h.is_empty()) {
            bail!(
                "host is set to '{}' but only on-box execution is supported: \
                 run tfjunos on the device or unset host / JUNOS_HOST",
                host
            );
        }
        if provider.fake_create_with_setfile.is_none() {
            if provider.fake_update_also {
                bail!("fake_update_also requires fake_create_with_setfile");
            }
            if provider.fake_delete_also {
                bail!("fake_delete_also requires fake_create_with_setfile");
            }
        }
        if let Some(minutes) = provider.commit_confirmed {
            if !(1..=65535).contains(&minutes) {
                bail!("commit_confirmed must be in 1..=65535, got {}", minutes);
            }
        }
        Ok(())
    }

    /// Options for a CLI session built from this configuration
    pub fn session_options(&self) -> CliSessionOptions {
        CliSessionOptions {
            sleep_lock: self.provider.sleep_lock,
            commit_confirmed: self.provider.commit_confirmed,
            command_timeout: self.provider.command_timeout,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "t" | "true" | "yes" | "on"
    )
}
