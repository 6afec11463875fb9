//! Integration tests for top-level CLI behavior.

mod support;

use std::path::{Path, PathBuf};
use std::process::Command;

use relsync::commands::sync::{run_with_context, SyncOptions};
use relsync::config::SyncConfig;
use relsync::desired::DesiredState;

fn relsync(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_relsync"));
    command.args(args).env_remove("RELSYNC_RECORD").env_remove("RELSYNC_REPLAY");
    command
}

fn run_relsync(args: &[&str]) -> std::process::Output {
    relsync(args).output().expect("failed to run relsync binary")
}

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("relsync.yaml"), support::CONFIG).unwrap();
    std::fs::write(dir.join("desired.yaml"), support::DESIRED).unwrap();
    dir
}

fn record_dry_run(cassette: &Path) {
    let (ctx, recorder) = support::recording_context(cassette);
    let config = SyncConfig::from_yaml(support::CONFIG).unwrap();
    let desired = DesiredState::from_yaml(support::DESIRED).unwrap();
    let options = SyncOptions { dry_run: true, ..SyncOptions::default() };
    run_with_context(&ctx, &config, &desired, options).unwrap();
    drop(ctx);
    recorder.lock().unwrap().write().unwrap();
}

#[test]
fn help_lists_subcommands() {
    let output = run_relsync(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("cache"));
    assert!(stdout.contains("sync"));
}

#[test]
fn sync_help_shows_flags() {
    let output = run_relsync(&["sync", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--prune"));
    assert!(stdout.contains("--desired"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_relsync(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn missing_config_file_exits_with_error() {
    let output = run_relsync(&["cache", "--config", "/nonexistent/relsync.yaml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn missing_api_key_exits_with_error() {
    let dir = fixture_dir("relsync_cli_no_key_test");
    let config = dir.join("relsync.yaml");
    let output = relsync(&["cache", "--config", config.to_str().unwrap()])
        .env_remove("RELSYNC_API_KEY")
        .current_dir(&dir)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Missing API key"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dry_run_sync_replays_cassette() {
    let dir = fixture_dir("relsync_cli_replay_test");
    let cassette = dir.join("session.cassette.yaml");
    record_dry_run(&cassette);

    let config = dir.join("relsync.yaml");
    let desired = dir.join("desired.yaml");
    let output = relsync(&[
        "sync",
        "--config",
        config.to_str().unwrap(),
        "--desired",
        desired.to_str().unwrap(),
        "--dry-run",
    ])
    .env("RELSYNC_REPLAY", &cassette)
    .output()
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Dry run — would perform:"));
    assert!(stdout.contains("CREATE dependency 1005:1006: Hosts"));
    assert!(stdout.contains("LINK 1002:1004"));
    let _ = std::fs::remove_dir_all(&dir);
}
