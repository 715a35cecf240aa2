//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats (paths, scheme names, extensions)
//! - Check option combinations (watching requires a navigation file)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField(&'static str),
    ZeroValue(&'static str),
    RelativeRedirect(String),
    InvalidScheme(String),
    InvalidExtension(String),
    WatchWithoutFile,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} must not be empty", field),
            ValidationError::ZeroValue(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::RelativeRedirect(path) => {
                write!(f, "routing.default_redirect must start with '/': {}", path)
            }
            ValidationError::InvalidScheme(scheme) => {
                write!(f, "protocol.scheme is not a valid URI scheme: {}", scheme)
            }
            ValidationError::InvalidExtension(ext) => {
                write!(f, "selection.filter extension is invalid: {:?}", ext)
            }
            ValidationError::WatchWithoutFile => {
                write!(f, "routing.watch requires routing.nav_file")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let routing = &config.routing;
    if routing.nav_root.is_empty() {
        errors.push(ValidationError::EmptyField("routing.nav_root"));
    }
    if routing.max_depth == 0 {
        errors.push(ValidationError::ZeroValue("routing.max_depth"));
    }
    if let Some(target) = &routing.default_redirect {
        if !target.starts_with('/') {
            errors.push(ValidationError::RelativeRedirect(target.clone()));
        }
    }
    if routing.watch && routing.nav_file.is_none() {
        errors.push(ValidationError::WatchWithoutFile);
    }

    if config.processor.interpreter.trim().is_empty() {
        errors.push(ValidationError::EmptyField("processor.interpreter"));
    }

    if !is_valid_scheme(&config.protocol.scheme) {
        errors.push(ValidationError::InvalidScheme(config.protocol.scheme.clone()));
    }

    if let Some(filter) = &config.selection.filter {
        if filter.extensions.is_empty() {
            errors.push(ValidationError::EmptyField("selection.filter.extensions"));
        }
        for ext in &filter.extensions {
            if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
                errors.push(ValidationError::InvalidExtension(ext.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
