//! Smoke tests running the demo binary with piped stdin.

use std::io::Write;
use std::process::{Command, Stdio};

/// Runs the binary with `stdin` as input; returns (exit code, stdout, stderr).
fn run_console(args: &[&str], stdin: &str) -> (i32, String, String) {
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_opconsole"))
        .args(args)
        .env("OPCONSOLE_CONFIG", config_dir.path().join("config.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn opconsole");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child
        .wait_with_output()
        .expect("Failed to wait for opconsole");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_echo_then_stop() {
    let (code, stdout, _) = run_console(&[], "echo hello world\nstop\n");

    assert_eq!(code, 0);
    assert!(stdout.starts_with("Starting console...\n"));
    assert!(stdout.contains("hello world\n"));
    assert!(stdout.contains("Stopping application..."));
    assert!(stdout.ends_with("Console stopped.\n"));
}

#[test]
fn test_unknown_command_lists_demo_commands() {
    let (code, stdout, _) = run_console(&[], "bogus arg\nstop\n");

    assert_eq!(code, 0);
    assert!(stdout.contains("Unknown command: [bogus arg]"));
    let listing = "Available Commands:\n - echo\n - help\n - stop\n - uptime\n";
    assert!(stdout.contains(listing));
}

#[test]
fn test_custom_prompt() {
    let (code, stdout, _) = run_console(&["--prompt", "ops> "], "stop\n");

    assert_eq!(code, 0);
    assert!(stdout.contains("ops> "));
    assert!(!stdout.contains(">> "));
}

#[test]
fn test_closed_stdin_exits_cleanly() {
    let (code, stdout, stderr) = run_console(&[], "");

    assert_eq!(code, 0);
    assert!(stdout.ends_with("Console stopped.\n"));
    assert!(stderr.contains("Input stream closed"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[console]\nprompt = 5\n")
        .expect("Failed to write config");

    let (code, _, stderr) = run_console(&["--config", path.to_str().unwrap()], "stop\n");

    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration Error"));
}
