//! Navigation configuration subsystem.
//!
//! # Data Flow
//! ```text
//! nav file (JSON/TOML) or built-in menu
//!     → loader.rs (parse into ConfigNode tree + typed NavData)
//!     → routing::collector (walk the `navMain` subtree for `url` values)
//!     → routing::router (route table)
//! ```
//!
//! # Design Decisions
//! - Mapping keys keep document order; traversal order depends on it
//! - The typed schema is for the menu only; route descriptors stay untyped

pub mod loader;
pub mod node;
pub mod schema;

pub use loader::{load_nav, NavDocument, NavError, NavFormat};
pub use node::ConfigNode;
pub use schema::{NavData, NavItem};
