//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging → Compile routes → Start watcher → IPC loop
//!
//! Shutdown (shutdown.rs):
//!     Signal or EOF → Stop reading requests → Kill running scripts → Exit
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_ctrl_c_listener;
