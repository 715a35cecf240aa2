//! IPC host: reads requests, dispatches them, writes replies and events.
//!
//! # Responsibilities
//! - Read JSON-line requests until EOF or shutdown
//! - Run each request on its own task so long scripts do not block others
//! - Serialize all output through one writer task
//!
//! # Design Decisions
//! - A bad line (invalid JSON or UTF-8) gets an error reply; the loop keeps going
//! - Script events for a request are written before its reply
//! - On EOF, in-flight requests finish before the host returns

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;

use crate::config::schema::AppConfig;
use crate::ipc::message::{Command, IpcMessage, RawRequest};
use crate::lifecycle::Shutdown;
use crate::media::selection::{select_files, SelectOptions};
use crate::processing::{JobEvent, ScriptRunner};
use crate::protocol::ResourceHandler;
use crate::routing::LiveRoutes;

/// Everything a request handler needs.
pub struct IpcHost {
    routes: Arc<LiveRoutes>,
    runner: ScriptRunner,
    resources: ResourceHandler,
    selection: SelectOptions,
    shutdown: Shutdown,
}

impl IpcHost {
    pub fn new(config: &AppConfig, routes: Arc<LiveRoutes>, shutdown: Shutdown) -> Self {
        Self {
            routes,
            runner: ScriptRunner::new(&config.app, &config.processor),
            resources: ResourceHandler::new(&config.protocol),
            selection: SelectOptions::from(&config.selection),
            shutdown,
        }
    }

    /// Serve requests from `reader`, writing output to `writer`.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_messages(writer, out_rx));
        let mut shutdown = self.shutdown.subscribe();
        let mut in_flight = JoinSet::new();
        let mut reader = reader;
        let mut buf = Vec::new();

        tracing::info!("IPC host ready");
        loop {
            buf.clear();
            tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => {
                    match read {
                        Ok(0) => {
                            tracing::info!("IPC input closed");
                            break;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to read IPC input");
                            break;
                        }
                    }

                    let line = match String::from_utf8(std::mem::take(&mut buf)) {
                        Ok(line) => line,
                        Err(e) => {
                            tracing::warn!(error = %e, "Rejecting non UTF-8 request line");
                            let _ = out_tx.send(IpcMessage::err(Value::Null, e));
                            continue;
                        }
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    // Subscribe before the task exists so a concurrent trigger is never missed.
                    let stop = self.shutdown.subscribe();
                    if self.shutdown.is_triggered() {
                        tracing::info!("IPC host stopping");
                        break;
                    }
                    let host = self.clone();
                    let out = out_tx.clone();
                    in_flight.spawn(async move { host.handle_line(&line, &out, stop).await });
                }
                _ = shutdown.recv() => {
                    tracing::info!("IPC host stopping");
                    break;
                }
            }
        }

        while in_flight.join_next().await.is_some() {}
        drop(out_tx);
        writer_task.await.map_err(std::io::Error::other)??;
        Ok(())
    }

    async fn handle_line(
        &self,
        line: &str,
        out: &mpsc::UnboundedSender<IpcMessage>,
        stop: broadcast::Receiver<()>,
    ) {
        let request = match RawRequest::parse(line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting malformed request");
                let _ = out.send(IpcMessage::err(Value::Null, e));
                return;
            }
        };

        tracing::debug!(channel = %request.channel, id = %request.id, "IPC request");
        let reply = match Command::from_request(&request) {
            Ok(command) => match self.dispatch(command, &request.id, out, stop).await {
                Ok(data) => IpcMessage::ok(request.id, data),
                Err(e) => IpcMessage::err(request.id, e),
            },
            Err(e) => IpcMessage::err(request.id, e),
        };
        let _ = out.send(reply);
    }

    async fn dispatch(
        &self,
        command: Command,
        id: &Value,
        out: &mpsc::UnboundedSender<IpcMessage>,
        stop: broadcast::Receiver<()>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        match command {
            Command::Routes => Ok(serde_json::to_value(&*self.routes.snapshot())?),
            Command::Resolve(p) => {
                let resolution = self.routes.snapshot().resolve(&p.path)?;
                Ok(serde_json::to_value(resolution)?)
            }
            Command::SelectFiles(p) => {
                let mut options = self.selection.clone();
                if let Some(multi) = p.multi {
                    options.multi_select = multi;
                }
                Ok(serde_json::to_value(select_files(&p.paths, &options))?)
            }
            Command::Process(p) => {
                let (events_tx, mut events_rx) = mpsc::unbounded_channel::<JobEvent>();
                let forward_out = out.clone();
                let forward_id = id.clone();
                let forwarder = tokio::spawn(async move {
                    while let Some(job_event) = events_rx.recv().await {
                        let _ = forward_out.send(IpcMessage::Event {
                            event: job_event.event.channel(),
                            id: forward_id.clone(),
                            data: job_event.event.line().to_string(),
                        });
                    }
                });

                let result = self.runner.run(&p.file, events_tx, stop).await;
                let _ = forwarder.await;
                Ok(serde_json::to_value(result?)?)
            }
            Command::Resource(p) => {
                let resource = self.resources.read(&p.uri).await?;
                Ok(json!({
                    "path": resource.path,
                    "mime": resource.mime,
                    "size": resource.bytes.len(),
                }))
            }
        }
    }
}

async fn write_messages<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<IpcMessage>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        let mut line = serde_json::to_vec(&message)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    Ok(())
}
