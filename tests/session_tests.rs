//! Integration tests for the device CLI session
//!
//! Drives [`CliSession`] through the scripted [`common::MockConnection`] and
//! checks the commands sent to the device for show, commit and failure paths.

mod common;

use common::{lldp_interface, MockConnection};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tfjunos::connection::{CommandResult, ConnectionError};
use tfjunos::lifecycle::{show_command, Driver, Resource};
use tfjunos::resources::{LldpInterface, SamplingInstance};
use tfjunos::session::{CliSession, CliSessionOptions, Session, SessionError};
use tfjunos::Error;

fn ok(stdout: &str) -> CommandResult {
    CommandResult::success(stdout.to_string(), String::new())
}

fn session_over(conn: &Arc<MockConnection>, options: CliSessionOptions) -> Arc<CliSession> {
    Arc::new(CliSession::new(conn.clone(), options))
}

#[tokio::test]
async fn test_show_command_is_framed() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("show configuration", ok("set disable\n"));
    let session = session_over(&conn, CliSessionOptions::default());

    let path = LldpInterface::named("ge-0/0/1").show_path();
    let output = session.command(&show_command(&path)).await.unwrap();

    assert!(output.contains("<configuration-output>"));
    assert!(output.contains("set disable"));
    assert_eq!(
        conn.get_commands(),
        vec!["cli -c 'show configuration protocols lldp interface \"ge-0/0/1\" | display set relative | no-more'"]
    );
}

#[tokio::test]
async fn test_read_through_cli() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result(
        "show configuration",
        ok("\nset input rate 100\nset family inet output flow-server 192.0.2.1 port 2055\n"),
    );
    let driver = Driver::new(session_over(&conn, CliSessionOptions::default()));

    let imported: SamplingInstance = driver.import("samp1_-_default").await.unwrap();
    let output = imported.family_inet_output.unwrap();
    assert_eq!(output.flow_server.len(), 1);
    assert_eq!(output.flow_server.get(0).unwrap().hostname, "192.0.2.1");
    assert!(imported.input.is_some());
}

#[tokio::test]
async fn test_update_loads_staged_file_and_commits() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("configure exclusive", ok("commit complete\n"));
    conn.set_command_result(
        "show configuration",
        ok("set disable\nset trap-notification enable\n"),
    );
    let session = session_over(&conn, CliSessionOptions::default());
    let driver = Driver::new(session.clone());

    let prior = LldpInterface::named("ge-0/0/1");
    let planned = lldp_interface("ge-0/0/1");
    let updated = driver.update(&prior, &planned).await.unwrap();
    assert_eq!(updated, planned);

    let commands = conn.get_commands();
    assert_eq!(commands.len(), 4);
    assert!(commands[0].starts_with("printf '%s' 'delete protocols lldp interface \"ge-0/0/1\" disable"));
    assert!(commands[0].contains("set protocols lldp interface \"ge-0/0/1\" trap-notification enable"));
    assert!(commands[1].contains("configure exclusive; load set /var/tmp/tfjunos_"));
    assert!(commands[1].contains("commit comment \"update resource junos_lldp_interface\""));
    assert!(commands[2].starts_with("rm -f /var/tmp/tfjunos_"));
    assert!(commands[3].contains("show configuration"));
    assert!(!session.is_locked());
}

#[tokio::test]
async fn test_commit_confirmed_mode() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("configure exclusive", ok("commit complete\n"));
    let options = CliSessionOptions {
        commit_confirmed: Some(2),
        ..Default::default()
    };
    let session = session_over(&conn, options);

    session.config_lock().await.unwrap();
    session
        .config_set(&["set protocols lldp interface \"ge-0/0/1\" disable".to_string()])
        .await
        .unwrap();
    session.commit_conf("msg").await.unwrap();
    session.config_unlock().await.unwrap();

    assert!(conn.get_commands()[1].contains("commit confirmed 2 comment \"msg\"; commit; exit"));
}

#[tokio::test]
async fn test_create_absent_after_commit() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("configure exclusive", ok("commit complete\n"));
    let driver = Driver::new(session_over(&conn, CliSessionOptions::default()));

    let err = driver
        .create(&lldp_interface("ge-0/0/1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err
        .to_string()
        .ends_with("not exists after commit => check your config"));
    // pre-check read, staged write, commit, cleanup, read back
    assert_eq!(conn.command_count(), 5);
}

#[tokio::test]
async fn test_commit_without_confirmation_fails() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result(
        "configure exclusive",
        ok("error: configuration database locked by:\n  admin terminal p0\n"),
    );
    let session = session_over(&conn, CliSessionOptions::default());
    let driver = Driver::new(session.clone());

    let err = driver
        .create(&lldp_interface("ge-0/0/1"))
        .await
        .unwrap_err();
    match err {
        Error::Session(SessionError::CommitFailed(output)) => {
            assert!(output.contains("database locked"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!session.is_locked());
    assert!(session.pending().is_empty());
    // staged file removed even though the commit failed
    assert!(conn.get_commands().iter().any(|c| c.starts_with("rm -f ")));
}

#[tokio::test]
async fn test_commit_output_without_complete_marker_fails() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("configure exclusive", ok("load complete\n"));
    let session = session_over(&conn, CliSessionOptions::default());

    session.config_lock().await.unwrap();
    session.config_set(&["set x".to_string()]).await.unwrap();
    let err = session.commit_conf("msg").await.unwrap_err();
    assert!(matches!(err, SessionError::CommitFailed(_)));
}

#[tokio::test]
async fn test_cleanup_failure_keeps_commit_result() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("configure exclusive", ok("commit complete\n"));
    conn.set_command_result(
        "rm -f ",
        CommandResult::failure(1, String::new(), "rm: Operation not permitted".into()),
    );
    let session = session_over(&conn, CliSessionOptions::default());

    session.config_lock().await.unwrap();
    session.config_set(&["set x".to_string()]).await.unwrap();
    session.commit_conf("msg").await.unwrap();

    let commands = conn.get_commands();
    assert_eq!(commands.len(), 3);
    assert!(commands[2].starts_with("rm -f /var/tmp/tfjunos_"));
}

#[tokio::test]
async fn test_cleanup_failure_does_not_mask_commit_error() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result("configure exclusive", ok("error: syntax error\n"));
    conn.set_command_result(
        "rm -f ",
        CommandResult::failure(1, String::new(), "rm: Operation not permitted".into()),
    );
    let session = session_over(&conn, CliSessionOptions::default());

    session.config_lock().await.unwrap();
    session.config_set(&["set x".to_string()]).await.unwrap();
    let err = session.commit_conf("msg").await.unwrap_err();
    match err {
        SessionError::CommitFailed(output) => assert_eq!(output, "error: syntax error"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_failed_staging_write() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_command_result(
        "printf",
        CommandResult::failure(1, String::new(), "sh: /var/tmp: Read-only file system".into()),
    );
    let session = session_over(&conn, CliSessionOptions::default());

    session.config_lock().await.unwrap();
    session.config_set(&["set x".to_string()]).await.unwrap();
    let err = session.commit_conf("msg").await.unwrap_err();
    assert!(matches!(err, SessionError::CommandFailed { .. }));
    assert_eq!(conn.command_count(), 1);
}

#[tokio::test]
async fn test_empty_commit_sends_nothing() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    let session = session_over(&conn, CliSessionOptions::default());

    session.config_lock().await.unwrap();
    session.commit_conf("msg").await.unwrap();
    assert_eq!(conn.command_count(), 0);
}

#[tokio::test]
async fn test_connection_failure_surfaces_as_session_error() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_should_fail(true);
    let driver = Driver::new(session_over(&conn, CliSessionOptions::default()));

    let err = driver
        .read(&LldpInterface::named("ge-0/0/1"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Session(SessionError::Connection(ConnectionError::ConnectionFailed(_)))
    ));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_show_failure_names_command() {
    let conn = Arc::new(MockConnection::new("vsrx1"));
    conn.set_default_result(CommandResult::failure(
        127,
        String::new(),
        "sh: cli: not found".into(),
    ));
    let session = session_over(&conn, CliSessionOptions::default());

    let err = session.command("show version").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "command 'show version' failed: sh: cli: not found"
    );
}
