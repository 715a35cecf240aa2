//! Script execution against real `sh` scripts.

#![cfg(unix)]

use std::time::Duration;

use navdesk::lifecycle::Shutdown;
use navdesk::processing::{ProcessError, ProcessEvent, ScriptRunner};
use tokio::sync::mpsc;

mod common;

fn drain(rx: &mut mpsc::UnboundedReceiver<navdesk::processing::JobEvent>) -> Vec<ProcessEvent> {
    let mut events = Vec::new();
    while let Ok(job_event) = rx.try_recv() {
        events.push(job_event.event);
    }
    events
}

#[tokio::test]
async fn test_streams_output_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(dir.path(), "clip.mp4", "video");
    let config = common::sh_config(
        dir.path(),
        "echo \"file=$1\"\necho warning >&2\necho \"data=$2\"\n",
        0,
    );
    let runner = ScriptRunner::new(&config.app, &config.processor);
    let shutdown = Shutdown::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let outcome = runner.run(&input, tx, shutdown.subscribe()).await.unwrap();
    assert_eq!(outcome.message, "processing complete");
    assert_eq!(outcome.stdout_lines, 2);
    assert_eq!(outcome.stderr_lines, 1);
    assert!(dir.path().join("user-data").is_dir());

    let events = drain(&mut rx);
    let stdout: Vec<&ProcessEvent> = events
        .iter()
        .filter(|e| matches!(e, ProcessEvent::Output(_)))
        .collect();
    assert_eq!(stdout[0], &ProcessEvent::Output(format!("file={}", input.display())));
    assert_eq!(
        stdout[1],
        &ProcessEvent::Output(format!("data={}", dir.path().join("user-data").display()))
    );
    assert!(events.contains(&ProcessEvent::Error("warning".into())));
}

#[tokio::test]
async fn test_nonzero_exit_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(dir.path(), "clip.mp4", "video");
    let config = common::sh_config(dir.path(), "echo failing >&2\nexit 3\n", 0);
    let runner = ScriptRunner::new(&config.app, &config.processor);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let err = runner
        .run(&input, tx, Shutdown::new().subscribe())
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::Exit { code: Some(3) }));
    assert_eq!(drain(&mut rx), vec![ProcessEvent::Error("failing".into())]);
}

#[tokio::test]
async fn test_missing_input_fails_before_spawn() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::sh_config(dir.path(), "exit 0\n", 0);
    let runner = ScriptRunner::new(&config.app, &config.processor);
    let (tx, _rx) = mpsc::unbounded_channel();

    let err = runner
        .run(&dir.path().join("absent.mp4"), tx, Shutdown::new().subscribe())
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::InputNotFound(_)));
}

#[tokio::test]
async fn test_timeout_kills_script() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(dir.path(), "clip.mp4", "video");
    let config = common::sh_config(dir.path(), "sleep 10\n", 1);
    let runner = ScriptRunner::new(&config.app, &config.processor);
    let (tx, _rx) = mpsc::unbounded_channel();

    let err = runner
        .run(&input, tx, Shutdown::new().subscribe())
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::Timeout(1)));
}

#[tokio::test]
async fn test_shutdown_cancels_script() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(dir.path(), "clip.mp4", "video");
    let config = common::sh_config(dir.path(), "sleep 10\n", 0);
    let runner = ScriptRunner::new(&config.app, &config.processor);
    let shutdown = Shutdown::new();
    let (tx, _rx) = mpsc::unbounded_channel();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.trigger();
    });

    let err = runner.run(&input, tx, shutdown.subscribe()).await.unwrap_err();
    assert!(matches!(err, ProcessError::Cancelled));
}

#[tokio::test]
async fn test_timeout_covers_pipes_held_by_background_children() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(dir.path(), "clip.mp4", "video");
    let config = common::sh_config(dir.path(), "sleep 5 &\nexit 0\n", 1);
    let runner = ScriptRunner::new(&config.app, &config.processor);
    let (tx, _rx) = mpsc::unbounded_channel();

    let start = std::time::Instant::now();
    let err = runner
        .run(&input, tx, Shutdown::new().subscribe())
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::Timeout(1)));
    assert!(start.elapsed() < Duration::from_secs(4));
}
