//! Script location.
//!
//! Development runs use the script from the source tree, packaged runs the
//! copy bundled with the resources. An explicit `processor.script_path`
//! overrides both.

use std::path::{Path, PathBuf};

use crate::config::schema::{AppSection, ProcessorConfig};

const SCRIPT_DIR: &str = "pythons";
const SCRIPT_NAME: &str = "main.py";

/// Where the processing script was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLocation {
    Configured(PathBuf),
    Development(PathBuf),
    Packaged(PathBuf),
}

impl ScriptLocation {
    pub fn path(&self) -> &Path {
        match self {
            ScriptLocation::Configured(p)
            | ScriptLocation::Development(p)
            | ScriptLocation::Packaged(p) => p,
        }
    }
}

/// Pick the script for the current run mode.
pub fn locate_script(app: &AppSection, processor: &ProcessorConfig) -> ScriptLocation {
    if let Some(path) = &processor.script_path {
        return ScriptLocation::Configured(path.clone());
    }
    if app.is_dev() {
        ScriptLocation::Development(app.app_root.join("src").join(SCRIPT_DIR).join(SCRIPT_NAME))
    } else {
        ScriptLocation::Packaged(app.resources_dir.join(SCRIPT_DIR).join(SCRIPT_NAME))
    }
}
