//! Dispatch loop tests driven by scripted input streams.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use opconsole::{ConsoleState, RegisterOutcome};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::Level;

use super::common::{console_with, scripted};

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[tokio::test]
async fn test_whitespace_line_dispatches_nothing() {
    let (console, captured, _) = scripted("  \nstop\n");

    console.start().unwrap().wait().await.unwrap();

    let text = captured.contents();
    assert!(!text.contains("Unknown command"));
    assert!(!text.contains("Available Commands:"));
    assert!(text.ends_with("Console stopped.\n"));
}

#[tokio::test]
async fn test_unknown_command_prints_notice_and_help_once() {
    let (console, captured, _) = scripted("foo bar baz\nstop\n");

    console.start().unwrap().wait().await.unwrap();

    let text = captured.contents();
    let expected = "Unknown command: [foo bar baz]\nAvailable Commands:\n - help\n - stop\n";
    assert!(text.contains(expected));
    assert_eq!(text.matches("Available Commands:").count(), 1);
}

#[tokio::test]
async fn test_stop_signals_completion_exactly_once() {
    let (console, captured, logger) = scripted("stop\necho late\n");
    let echoed = counter();
    let echo_count = echoed.clone();
    console.register("echo", move |_| {
        echo_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let (tx, mut rx) = mpsc::channel(1);
    let handle = console.start_with_signal(tx).unwrap();

    assert_eq!(rx.recv().await, Some(()));
    assert_eq!(rx.recv().await, None);
    handle.wait().await.unwrap();

    assert_eq!(console.state(), ConsoleState::Stopped);
    assert_eq!(echoed.load(Ordering::SeqCst), 0);
    assert!(captured
        .contents()
        .contains("Stopping application...\nConsole stopped.\n"));
    assert!(logger
        .messages()
        .contains(&"Received stop command via console".to_string()));
}

#[tokio::test]
async fn test_prompt_precedes_every_read() {
    let (console, captured, _) = scripted("help\nstop\n");

    console.start().unwrap().wait().await.unwrap();

    let text = captured.contents();
    assert!(text.starts_with("Starting console...\n>> Available Commands:"));
    assert_eq!(text.matches(">> ").count(), 2);
}

#[tokio::test]
async fn test_handler_failure_keeps_loop_alive() {
    let (console, captured, _) = scripted("fail\necho\nstop\n");
    let echoed = counter();
    let echo_count = echoed.clone();
    console.register("fail", |_| anyhow::bail!("disk unavailable"));
    console.register("echo", move |_| {
        echo_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    console.start().unwrap().wait().await.unwrap();

    assert!(captured
        .contents()
        .contains("Error executing command: disk unavailable\n"));
    assert_eq!(echoed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_read_error_keeps_loop_alive() {
    let mock = tokio_test::io::Builder::new()
        .read(b"echo one\n")
        .read_error(io::Error::other("device hiccup"))
        .read(b"echo two\nstop\n")
        .build();
    let (console, captured, logger) = console_with(BufReader::new(mock), false);
    let echoed = counter();
    let echo_count = echoed.clone();
    console.register("echo", move |_| {
        echo_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    console.start().unwrap().wait().await.unwrap();

    assert_eq!(echoed.load(Ordering::SeqCst), 2);
    assert!(captured
        .contents()
        .contains("Error reading command: device hiccup\n"));
    assert_eq!(logger.count_at(Level::ERROR), 1);
}

#[tokio::test]
async fn test_end_of_input_stops_loop() {
    let (console, captured, logger) = scripted("help\n");

    console.start().unwrap().wait().await.unwrap();

    assert!(!console.is_running());
    assert!(captured.contents().ends_with("Console stopped.\n"));
    assert!(logger
        .messages()
        .contains(&"Input stream closed, stopping console".to_string()));
}

#[tokio::test]
async fn test_builtins_registered_on_start() {
    let (console, _, _) = scripted("stop\n");
    assert!(console.registry().is_empty());

    let handle = console.start().unwrap();
    assert!(console.registry().contains("help"));
    assert!(console.registry().contains("stop"));
    handle.wait().await.unwrap();
}

#[tokio::test]
async fn test_registration_rejected_while_running() {
    let (mut client, server) = tokio::io::duplex(64);
    let (console, _, logger) = console_with(BufReader::new(server), false);

    let handle = console.start().unwrap();
    assert!(console.is_running());

    let outcome = console.register("late", |_| Ok(()));
    assert_eq!(outcome, RegisterOutcome::RejectedRunning);
    assert!(!console.registry().contains("late"));
    assert_eq!(logger.count_at(Level::WARN), 1);

    client.write_all(b"stop\n").await.unwrap();
    handle.wait().await.unwrap();
}

#[tokio::test]
async fn test_request_stop_takes_effect_after_pending_read() {
    let (mut client, server) = tokio::io::duplex(64);
    let (console, captured, _) = console_with(BufReader::new(server), false);
    let echoed = counter();
    let echo_count = echoed.clone();
    console.register("echo", move |_| {
        echo_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let handle = console.start().unwrap();
    assert!(handle.request_stop());

    client.write_all(b"echo\n").await.unwrap();
    handle.wait().await.unwrap();

    assert_eq!(console.state(), ConsoleState::Stopped);
    assert!(echoed.load(Ordering::SeqCst) <= 1);
    assert!(captured.contents().ends_with("Console stopped.\n"));
}

#[tokio::test]
async fn test_user_stop_survives_without_overwrite() {
    let (console, captured, logger) = scripted("stop\n");
    let output_hits = counter();
    let hits = output_hits.clone();
    console.register("stop", move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    console.start().unwrap().wait().await.unwrap();

    assert_eq!(output_hits.load(Ordering::SeqCst), 1);
    assert!(!captured.contents().contains("Stopping application..."));
    assert!(logger
        .messages()
        .contains(&"Command stop already registered, skipping".to_string()));
}

#[tokio::test]
async fn test_second_start_while_running_fails() {
    let (mut client, server) = tokio::io::duplex(64);
    let (console, _, _) = console_with(BufReader::new(server), false);

    let handle = console.start().unwrap();
    assert!(matches!(
        console.start(),
        Err(opconsole::ConsoleError::AlreadyRunning)
    ));

    client.write_all(b"stop\n").await.unwrap();
    handle.wait().await.unwrap();
}
