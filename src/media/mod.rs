//! Media file handling.

pub mod selection;

pub use selection::{select_files, FileFilter, SelectOptions};
