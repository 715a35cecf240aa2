//! navdesk host process.
//!
//! # Architecture Overview
//!
//! ```text
//!   UI process                         navdesk
//!  ┌──────────┐  stdin (JSON lines)  ┌──────────────────────────────────────┐
//!  │          │ ───────────────────▶ │ ipc::host ──▶ routing (LiveRoutes)   │
//!  │ renderer │                      │           ──▶ media::selection       │
//!  │          │ ◀─────────────────── │           ──▶ protocol::resource     │
//!  └──────────┘  stdout (replies,    │           ──▶ processing::runner ──┐ │
//!                 py:output/py:error)│                                    │ │
//!                                    │   nav file ─▶ config::watcher ─────┼─┤ reload
//!                                    └────────────────────────────────────┼─┘
//!                                                                         ▼
//!                                                              python -u main.py <file> <user_data>
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use navdesk::config::watcher::{spawn_reloader, NavWatcher};
use navdesk::lifecycle::{spawn_ctrl_c_listener, Shutdown};
use navdesk::observability::logging;
use navdesk::{load_app_config, load_navigation, IpcHost, LiveRoutes};

#[derive(Parser)]
#[command(name = "navdesk")]
#[command(about = "Media processing host speaking JSON lines on stdin/stdout", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_app_config(args.config.as_deref())?;
    logging::init(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        dev = config.app.is_dev(),
        nav_file = ?config.routing.nav_file,
        "navdesk starting"
    );

    let doc = load_navigation(&config)?;
    let routes = Arc::new(LiveRoutes::from_document(&doc, config.routing.clone())?);

    // Keep the watcher handle alive for the whole run.
    let _watcher = match (&config.routing.nav_file, config.routing.watch) {
        (Some(path), true) => {
            let (watcher, updates) = NavWatcher::new(path);
            let handle = watcher.run()?;
            spawn_reloader(routes.clone(), updates);
            Some(handle)
        }
        _ => None,
    };

    let shutdown = Shutdown::new();
    spawn_ctrl_c_listener(shutdown.clone());

    let host = Arc::new(IpcHost::new(&config, routes, shutdown));
    host.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
