//! Route table compilation from a navigation document.

use thiserror::Error;

use crate::config::schema::RoutingConfig;
use crate::nav::loader::NavDocument;
use crate::routing::collector::{collect_bounded, CollectError};
use crate::routing::route::RouteError;
use crate::routing::router::RouteTable;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error("Invalid routes: {}", join(.0))]
    Invalid(Vec<RouteError>),
}

fn join(errors: &[RouteError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collect the routes under `config.nav_root` and build the table.
pub fn compile_routes(doc: &NavDocument, config: &RoutingConfig) -> Result<RouteTable, CompileError> {
    let descriptors = collect_bounded(doc.subtree(&config.nav_root), config.max_depth)?;
    let table = RouteTable::build(&descriptors, config.default_redirect.as_deref())
        .map_err(CompileError::Invalid)?;

    tracing::info!(
        nav_root = %config.nav_root,
        collected = descriptors.len(),
        routes = table.len(),
        "Route table compiled"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_builtin_menu() {
        let table = compile_routes(&NavDocument::builtin(), &RoutingConfig::default()).unwrap();
        let paths: Vec<&str> = table.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/auto", "/auto/video", "/auto/auto2", "/"]);
        assert_eq!(table.resolve("/").unwrap().route.component.as_deref(), Some("Video"));
    }

    #[test]
    fn test_missing_root_yields_only_default_redirect_error() {
        let config = RoutingConfig {
            nav_root: "absent".into(),
            ..RoutingConfig::default()
        };
        let err = compile_routes(&NavDocument::builtin(), &config).unwrap_err();
        assert!(matches!(err, CompileError::Invalid(ref e) if e.len() == 1));
    }

    #[test]
    fn test_depth_limit_applies() {
        let config = RoutingConfig {
            max_depth: 2,
            ..RoutingConfig::default()
        };
        let err = compile_routes(&NavDocument::builtin(), &config).unwrap_err();
        assert!(matches!(err, CompileError::Collect(_)));
    }
}
