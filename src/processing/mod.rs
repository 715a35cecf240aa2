//! Script processing subsystem.
//!
//! # Data Flow
//! ```text
//! py:process(file)
//!     → script.rs (configured / development / packaged script path)
//!     → runner.rs (spawn interpreter, pump stdout/stderr)
//!     → events.rs (py:output / py:error lines to the caller)
//!     → exit 0 ⇒ ProcessOutcome, otherwise ProcessError
//! ```

pub mod events;
pub mod runner;
pub mod script;

pub use events::{JobEvent, ProcessEvent};
pub use runner::{ProcessError, ProcessOutcome, ScriptRunner};
pub use script::{locate_script, ScriptLocation};
