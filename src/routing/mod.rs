//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup and on navigation reload):
//!     NavDocument subtree (routing.nav_root)
//!     → collector.rs (every value under a `url` key, pre-order)
//!     → route.rs (descriptor → RouteRecord)
//!     → router.rs (append `/` redirect, validate, index)
//!     → live.rs (atomic swap of Arc<RouteTable>)
//!
//! Lookup:
//!     path → router.rs (normalize, exact match, follow redirects)
//!     → Return: Resolution or explicit NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable afterwards
//! - Deterministic: traversal order follows document key order
//! - Explicit NotFound rather than silent default

pub mod collector;
pub mod compile;
pub mod live;
pub mod route;
pub mod router;

pub use collector::{collect, collect_bounded, RouteDescriptor};
pub use compile::{compile_routes, CompileError};
pub use live::LiveRoutes;
pub use route::{RouteError, RouteRecord};
pub use router::{Resolution, RouteTable};
