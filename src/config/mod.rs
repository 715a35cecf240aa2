//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + environment
//!     → loader.rs (parse, deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! Navigation reload:
//!     watcher.rs detects change to routing.nav_file
//!     → nav::loader loads the new document
//!     → routing::live recompiles and swaps the route table
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the navigation document reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AppConfig;
pub use schema::FileFilter;
pub use schema::LoggingConfig;
pub use schema::ProcessorConfig;
pub use schema::RoutingConfig;
