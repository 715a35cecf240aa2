use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use navdesk::lifecycle::{spawn_ctrl_c_listener, Shutdown};
use navdesk::media::{select_files, SelectOptions};
use navdesk::observability::logging;
use navdesk::processing::{JobEvent, ProcessEvent, ScriptRunner};
use navdesk::protocol::ResourceHandler;
use navdesk::routing::compile_routes;
use navdesk::{load_app_config, load_navigation};

#[derive(Parser)]
#[command(name = "navdesk-cli")]
#[command(about = "One-shot commands for navdesk", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Navigation file, overriding routing.nav_file.
    #[arg(short, long)]
    nav: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled route table
    Routes,
    /// Resolve a path, following redirects
    Resolve { path: String },
    /// Run the processing script on a file
    Process { file: PathBuf },
    /// Filter candidate paths the way the file picker does
    Select {
        paths: Vec<PathBuf>,
        #[arg(long)]
        multi: bool,
    },
    /// Write a resource URI's bytes to stdout
    Read { uri: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_app_config(cli.config.as_deref())?;
    if cli.nav.is_some() {
        config.routing.nav_file = cli.nav;
    }
    logging::init(&config.logging);

    match cli.command {
        Commands::Routes => {
            let table = compile_routes(&load_navigation(&config)?, &config.routing)?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Commands::Resolve { path } => {
            let table = compile_routes(&load_navigation(&config)?, &config.routing)?;
            let resolution = table.resolve(&path)?;
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::Process { file } => {
            let shutdown = Shutdown::new();
            spawn_ctrl_c_listener(shutdown.clone());
            let runner = ScriptRunner::new(&config.app, &config.processor);

            let (tx, mut rx) = mpsc::unbounded_channel::<JobEvent>();
            let printer = tokio::spawn(async move {
                while let Some(job_event) = rx.recv().await {
                    match job_event.event {
                        ProcessEvent::Output(line) => println!("{}", line),
                        ProcessEvent::Error(line) => eprintln!("{}", line),
                    }
                }
            });

            let result = runner.run(&file, tx, shutdown.subscribe()).await;
            printer.await?;
            let outcome = result?;
            eprintln!("{} ({} ms)", outcome.message, outcome.elapsed_ms);
        }
        Commands::Select { paths, multi } => {
            let mut options = SelectOptions::from(&config.selection);
            options.multi_select |= multi;
            for path in select_files(&paths, &options) {
                println!("{}", path.display());
            }
        }
        Commands::Read { uri } => {
            let resource = ResourceHandler::new(&config.protocol).read(&uri).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&resource.bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
