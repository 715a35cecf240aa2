//! File selection.
//!
//! Takes the paths a picker produced and returns the ones the processing
//! pipeline may use: absolute paths of existing regular files that pass the
//! extension filter. An empty candidate list means the picker was cancelled.

use std::path::{Path, PathBuf};

pub use crate::config::schema::FileFilter;
use crate::config::schema::SelectionConfig;

/// Options for one selection.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub multi_select: bool,
    pub filter: Option<FileFilter>,
}

impl From<&SelectionConfig> for SelectOptions {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            multi_select: config.multi_select,
            filter: config.filter.clone(),
        }
    }
}

impl FileFilter {
    /// Case-insensitive extension match.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

/// Filter `candidates` down to usable files. Never fails; rejected paths are logged.
pub fn select_files<P: AsRef<Path>>(candidates: &[P], options: &SelectOptions) -> Vec<PathBuf> {
    if candidates.is_empty() {
        tracing::debug!("File selection cancelled");
        return Vec::new();
    }

    let mut selected = Vec::new();
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let path = match candidate.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(path = %candidate.display(), error = %e, "Skipping unreadable path");
                continue;
            }
        };
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Skipping non-file path");
            continue;
        }
        if let Some(filter) = &options.filter {
            if !filter.accepts(&path) {
                tracing::warn!(path = %path.display(), filter = %filter.name, "Skipping filtered file");
                continue;
            }
        }

        selected.push(path);
        if !options.multi_select {
            break;
        }
    }

    tracing::info!(count = selected.len(), "Files selected");
    selected
}
