//! External script execution.
//!
//! # Responsibilities
//! - Spawn `<interpreter> <args..> <script> <file> <user_data_dir>`
//! - Stream stdout/stderr line by line as `ProcessEvent`s
//! - Map the exit status to success or `ProcessError::Exit`
//!
//! # Design Decisions
//! - Nonzero exit is the only failure signal from the script itself
//! - Output is decoded lossily; a bad byte never aborts the stream
//! - Timeout and shutdown kill the child; both are distinct errors

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{broadcast, mpsc};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::schema::{AppSection, ProcessorConfig};
use crate::processing::events::{JobEvent, ProcessEvent};
use crate::processing::script::locate_script;

/// Message returned when a script finishes cleanly.
pub const COMPLETED_MESSAGE: &str = "processing complete";

/// Errors that can occur while running a script.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Input file does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to start {interpreter}: {source}")]
    Spawn {
        interpreter: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The script ran and exited unsuccessfully. `None` means killed by a signal.
    #[error("Python exit {}", .code.map_or_else(|| "null".to_string(), |c| c.to_string()))]
    Exit { code: Option<i32> },

    #[error("Script timed out after {0} seconds")]
    Timeout(u64),

    #[error("Script cancelled by shutdown")]
    Cancelled,
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub job_id: Uuid,
    pub message: String,
    pub stdout_lines: usize,
    pub stderr_lines: usize,
    pub elapsed_ms: u64,
}

/// Runs the processing script against one input file at a time.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    interpreter: String,
    interpreter_args: Vec<String>,
    script: PathBuf,
    user_data_dir: PathBuf,
    timeout_secs: u64,
}

impl ScriptRunner {
    pub fn new(app: &AppSection, processor: &ProcessorConfig) -> Self {
        let location = locate_script(app, processor);
        tracing::debug!(script = %location.path().display(), "Processing script located");

        Self {
            interpreter: processor.interpreter.clone(),
            interpreter_args: processor.interpreter_args.clone(),
            script: location.path().to_path_buf(),
            user_data_dir: app.user_data_dir(),
            timeout_secs: processor.timeout_secs,
        }
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn user_data_dir(&self) -> &Path {
        &self.user_data_dir
    }

    /// Run the script on `file`, streaming output to `events`.
    pub async fn run(
        &self,
        file: &Path,
        events: mpsc::UnboundedSender<JobEvent>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<ProcessOutcome, ProcessError> {
        let job_id = Uuid::new_v4();
        let span = tracing::info_span!("process", job_id = %job_id, file = %file.display());
        self.run_job(job_id, file, events, shutdown)
            .instrument(span)
            .await
    }

    async fn run_job(
        &self,
        job_id: Uuid,
        file: &Path,
        events: mpsc::UnboundedSender<JobEvent>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<ProcessOutcome, ProcessError> {
        if !self.script.is_file() {
            return Err(ProcessError::ScriptNotFound(self.script.clone()));
        }
        if !file.exists() {
            return Err(ProcessError::InputNotFound(file.to_path_buf()));
        }
        tokio::fs::create_dir_all(&self.user_data_dir).await?;

        tracing::info!(
            interpreter = %self.interpreter,
            script = %self.script.display(),
            user_data = %self.user_data_dir.display(),
            "Starting script"
        );
        let start = Instant::now();

        let mut child = Command::new(&self.interpreter)
            .args(&self.interpreter_args)
            .arg(&self.script)
            .arg(file)
            .arg(&self.user_data_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                interpreter: self.interpreter.clone(),
                source,
            })?;

        let stdout = spawn_pump(child.stdout.take(), job_id, events.clone(), ProcessEvent::Output);
        let stderr = spawn_pump(child.stderr.take(), job_id, events, ProcessEvent::Error);

        let aborts = [stdout.abort_handle(), stderr.abort_handle()];

        // Pipes can outlive the script (background children), so the deadline
        // covers draining them too.
        let finished = async {
            let status = child.wait().await?;
            let stdout_lines = stdout.await.unwrap_or(0);
            let stderr_lines = stderr.await.unwrap_or(0);
            Ok::<_, std::io::Error>((status, stdout_lines, stderr_lines))
        };

        let (status, stdout_lines, stderr_lines) = tokio::select! {
            result = finished => result?,
            _ = deadline(self.timeout_secs) => {
                tracing::warn!(timeout_secs = self.timeout_secs, "Script timed out, killing");
                terminate(&mut child, aborts).await;
                return Err(ProcessError::Timeout(self.timeout_secs));
            }
            _ = cancelled(&mut shutdown) => {
                tracing::warn!("Shutdown requested, killing script");
                terminate(&mut child, aborts).await;
                return Err(ProcessError::Cancelled);
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !status.success() {
            tracing::error!(code = ?status.code(), elapsed_ms, "Script failed");
            return Err(ProcessError::Exit { code: status.code() });
        }

        tracing::info!(stdout_lines, stderr_lines, elapsed_ms, "Script finished");
        Ok(ProcessOutcome {
            job_id,
            message: COMPLETED_MESSAGE.to_string(),
            stdout_lines,
            stderr_lines,
            elapsed_ms,
        })
    }
}

/// Forward each line of `reader` as an event. Returns the line count.
fn spawn_pump<R>(
    reader: Option<R>,
    job_id: Uuid,
    events: mpsc::UnboundedSender<JobEvent>,
    wrap: fn(String) -> ProcessEvent,
) -> JoinHandle<usize>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(
        async move {
            let Some(reader) = reader else { return 0 };
            let mut reader = BufReader::new(reader);
            let mut buf = Vec::new();
            let mut count = 0;

            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf)
                            .trim_end_matches(['\r', '\n'])
                            .to_string();
                        let event = wrap(line);
                        if let ProcessEvent::Error(line) = &event {
                            tracing::warn!(stderr = %line, "Script stderr");
                        }
                        count += 1;
                        let _ = events.send(JobEvent { job_id, event });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read script output");
                        break;
                    }
                }
            }
            count
        }
        .in_current_span(),
    )
}

async fn deadline(timeout_secs: u64) {
    if timeout_secs == 0 {
        std::future::pending::<()>().await
    } else {
        tokio::time::sleep(Duration::from_secs(timeout_secs)).await
    }
}

/// Resolves when shutdown is triggered. A dropped coordinator never resolves.
async fn cancelled(shutdown: &mut broadcast::Receiver<()>) {
    if let Err(broadcast::error::RecvError::Closed) = shutdown.recv().await {
        std::future::pending::<()>().await;
    }
}

async fn terminate(child: &mut Child, pumps: [AbortHandle; 2]) {
    if let Err(e) = child.kill().await {
        tracing::error!(error = %e, "Failed to kill script");
    }
    for pump in pumps {
        pump.abort();
    }
}
