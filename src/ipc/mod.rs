//! IPC subsystem.
//!
//! # Data Flow
//! ```text
//! stdin (JSON lines)
//!     → message.rs (RawRequest → Command)
//!     → host.rs (dispatch to routing / media / processing / protocol)
//!     → stdout (replies + py:output / py:error events)
//! ```

pub mod host;
pub mod message;

pub use host::IpcHost;
pub use message::{Command, IpcError, IpcMessage, RawRequest};
