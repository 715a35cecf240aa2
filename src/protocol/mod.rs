//! Custom URI scheme handling.

pub mod resource;

pub use resource::{Resource, ResourceError, ResourceHandler};
