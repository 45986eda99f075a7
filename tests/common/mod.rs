//! Shared test utilities for tfjunos integration tests
//!
//! - [`MockSession`]: an in-memory device holding committed configuration
//!   lines and answering `display set relative` show commands from them.
//! - [`MockConnection`]: a command transport with scripted replies, used to
//!   drive [`tfjunos::session::CliSession`].
//! - Fixture builders for the shipped resource types.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tfjunos::connection::{
    CommandResult, Connection, ConnectionError, ConnectionResult, ExecuteOptions,
};
use tfjunos::resources::{
    FlowServer, IgmpSnoopingVlan, Input, LldpInterface, Output, OutputInterface,
    SamplingInstance, SnoopingInterface, StaticGroup,
};
use tfjunos::session::{Session, SessionError, SessionResult};
use tfjunos::transcoder::{
    Attr, Blocks, PIPE_DISPLAY_SET_RELATIVE, SHOW_CONFIG, XML_END_COMMAND, XML_START_COMMAND,
};

// ============================================================================
// Mock Session
// ============================================================================

/// A device that stores committed configuration lines.
///
/// Lines are kept without their `set ` keyword, in commit order. A show
/// command for a path returns every stored line below it relative to the
/// path; a line equal to the path (a bare stanza) shows as `set`.
#[derive(Debug, Default)]
pub struct MockSession {
    config: RwLock<Vec<String>>,
    pending: RwLock<Vec<String>>,
    locked: AtomicBool,
    commands: RwLock<Vec<String>>,
    commits: RwLock<Vec<String>>,
    fail_commit: AtomicBool,
    lock_count: AtomicU32,
    unlock_count: AtomicU32,
    clear_count: AtomicU32,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration (lines without `set `).
    pub fn with_config<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let session = Self::new();
        *session.config.write() = lines.into_iter().map(Into::into).collect();
        session
    }

    /// Make every following commit fail.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    /// Stored configuration lines.
    pub fn config(&self) -> Vec<String> {
        self.config.read().clone()
    }

    /// Lines staged and not yet committed.
    pub fn pending(&self) -> Vec<String> {
        self.pending.read().clone()
    }

    /// Show commands received, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.read().clone()
    }

    /// Messages of successful commits, in order.
    pub fn commits(&self) -> Vec<String> {
        self.commits.read().clone()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    pub fn lock_count(&self) -> u32 {
        self.lock_count.load(Ordering::SeqCst)
    }

    pub fn unlock_count(&self) -> u32 {
        self.unlock_count.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> u32 {
        self.clear_count.load(Ordering::SeqCst)
    }

    fn show(&self, path: &str) -> String {
        let below = format!("{} ", path);
        let mut reply = vec![String::new(), XML_START_COMMAND.to_string()];
        for line in self.config.read().iter() {
            if line == path {
                reply.push("set".to_string());
            } else if let Some(rest) = line.strip_prefix(&below) {
                reply.push(format!("set {}", rest));
            }
        }
        reply.push(XML_END_COMMAND.to_string());
        reply.join("\n")
    }

    fn apply(&self, lines: &[String]) {
        let mut config = self.config.write();
        for line in lines {
            if let Some(item) = line.strip_prefix("set ") {
                if !config.iter().any(|l| l == item) {
                    config.push(item.to_string());
                }
            } else if let Some(item) = line.strip_prefix("delete ") {
                let below = format!("{} ", item);
                config.retain(|l| l != item && !l.starts_with(&below));
            }
        }
    }
}

#[async_trait]
impl Session for MockSession {
    async fn command(&self, cli: &str) -> SessionResult<String> {
        self.commands.write().push(cli.to_string());
        let path = cli
            .strip_prefix(SHOW_CONFIG)
            .and_then(|c| c.strip_suffix(PIPE_DISPLAY_SET_RELATIVE));
        match path {
            Some(path) => Ok(self.show(path)),
            None => Err(SessionError::CommandFailed {
                command: cli.to_string(),
                output: "error: syntax error".to_string(),
            }),
        }
    }

    async fn config_set(&self, lines: &[String]) -> SessionResult<()> {
        if !self.is_locked() {
            return Err(SessionError::NotLocked);
        }
        self.pending.write().extend_from_slice(lines);
        Ok(())
    }

    async fn config_lock(&self) -> SessionResult<()> {
        if self.locked.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyLocked);
        }
        self.lock_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn config_unlock(&self) -> SessionResult<()> {
        self.locked.store(false, Ordering::SeqCst);
        self.unlock_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit_conf(&self, message: &str) -> SessionResult<()> {
        if !self.is_locked() {
            return Err(SessionError::NotLocked);
        }
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(SessionError::CommitFailed(
                "error: configuration check-out failed".to_string(),
            ));
        }
        let lines = std::mem::take(&mut *self.pending.write());
        self.apply(&lines);
        self.commits.write().push(message.to_string());
        Ok(())
    }

    async fn config_clear(&self) -> SessionResult<()> {
        self.pending.write().clear();
        self.clear_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Mock Connection
// ============================================================================

/// A connection replying with the first scripted result whose pattern is a
/// substring of the command.
#[derive(Debug)]
pub struct MockConnection {
    identifier: String,
    alive: AtomicBool,
    commands_executed: RwLock<Vec<String>>,
    command_results: RwLock<Vec<(String, CommandResult)>>,
    default_result: RwLock<CommandResult>,
    should_fail: AtomicBool,
    command_count: AtomicU32,
}

impl MockConnection {
    /// Create a new mock connection with the given identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            alive: AtomicBool::new(true),
            commands_executed: RwLock::new(Vec::new()),
            command_results: RwLock::new(Vec::new()),
            default_result: RwLock::new(CommandResult::success(String::new(), String::new())),
            should_fail: AtomicBool::new(false),
            command_count: AtomicU32::new(0),
        }
    }

    /// Reply with `result` to commands containing `pattern`.
    pub fn set_command_result(&self, pattern: impl Into<String>, result: CommandResult) {
        self.command_results.write().push((pattern.into(), result));
    }

    /// Set the result for commands matching no pattern.
    pub fn set_default_result(&self, result: CommandResult) {
        *self.default_result.write() = result;
    }

    /// Configure the mock to fail all operations.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Get the number of commands executed.
    pub fn command_count(&self) -> u32 {
        self.command_count.load(Ordering::SeqCst)
    }

    /// Get all commands that were executed.
    pub fn get_commands(&self) -> Vec<String> {
        self.commands_executed.read().clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    async fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn execute(
        &self,
        command: &str,
        _options: Option<ExecuteOptions>,
    ) -> ConnectionResult<CommandResult> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(ConnectionError::ConnectionFailed(
                "Mock connection failed".to_string(),
            ));
        }

        self.command_count.fetch_add(1, Ordering::SeqCst);
        self.commands_executed.write().push(command.to_string());

        let results = self.command_results.read();
        if let Some((_, result)) = results.iter().find(|(p, _)| command.contains(p.as_str())) {
            return Ok(result.clone());
        }
        Ok(self.default_result.read().clone())
    }

    async fn close(&self) -> ConnectionResult<()> {
        self.alive.store(false, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Owned lines from string literals.
pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn lldp_interface(name: &str) -> LldpInterface {
    LldpInterface {
        disable: true,
        trap_notification_enable: true,
        ..LldpInterface::named(name)
    }
}

pub fn output_interface(name: &str, engine_id: i64, engine_type: i64) -> OutputInterface {
    OutputInterface {
        name: name.to_string(),
        engine_id: Attr::from(engine_id),
        engine_type: Attr::from(engine_type),
        ..OutputInterface::default()
    }
}

pub fn flow_server(hostname: &str, port: i64) -> FlowServer {
    FlowServer {
        hostname: hostname.to_string(),
        port: Attr::from(port),
        ..FlowServer::default()
    }
}

/// Sampling instance using every kind of field.
pub fn sampling_instance(name: &str, routing_instance: &str) -> SamplingInstance {
    SamplingInstance {
        input: Some(Input {
            rate: Attr::Known(100),
            run_length: Attr::Known(2),
            ..Input::default()
        }),
        family_inet_output: Some(Output {
            flow_active_timeout: Attr::Known(60),
            flow_server: vec![
                FlowServer {
                    version9_template: Attr::from("t4"),
                    ..flow_server("192.0.2.1", 2055)
                },
                flow_server("192.0.2.2", 2056),
            ]
            .into(),
            interface: Blocks::from(vec![output_interface("sp-0/0/0", 5, 2)]),
            ..Output::default()
        }),
        ..SamplingInstance::new(name, routing_instance)
    }
}

/// IGMP snooping VLAN with nested interfaces and static groups.
pub fn igmp_snooping_vlan(name: &str, routing_instance: &str) -> IgmpSnoopingVlan {
    IgmpSnoopingVlan {
        immediate_leave: true,
        query_interval: Attr::Known(125),
        interface: Blocks::from(vec![
            SnoopingInterface {
                name: "ge-0/0/1.0".to_string(),
                host_only_interface: true,
                static_group: Blocks::from(vec![StaticGroup {
                    address: "233.252.0.1".to_string(),
                    source: Attr::from("192.0.2.10"),
                }]),
                ..SnoopingInterface::default()
            },
            SnoopingInterface {
                name: "ge-0/0/2.0".to_string(),
                multicast_router_interface: true,
                ..SnoopingInterface::default()
            },
        ]),
        ..IgmpSnoopingVlan::new(name, routing_instance)
    }
}
