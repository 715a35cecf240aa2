//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, stderr)
//! Spans:
//!     → processing runs carry a `process` span with the job ID
//! ```

pub mod logging;
