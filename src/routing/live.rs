//! Shared, hot-swappable route table.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::RoutingConfig;
use crate::nav::loader::NavDocument;
use crate::routing::compile::{compile_routes, CompileError};
use crate::routing::router::RouteTable;

/// The current route table. Readers take a snapshot; reloads swap atomically.
#[derive(Debug)]
pub struct LiveRoutes {
    current: ArcSwap<RouteTable>,
    config: RoutingConfig,
}

impl LiveRoutes {
    pub fn new(table: RouteTable, config: RoutingConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
            config,
        }
    }

    /// Compile `doc` and wrap the result.
    pub fn from_document(doc: &NavDocument, config: RoutingConfig) -> Result<Self, CompileError> {
        let table = compile_routes(doc, &config)?;
        Ok(Self::new(table, config))
    }

    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.current.load_full()
    }

    /// Recompile from a reloaded document. On error the current table stays.
    pub fn reload(&self, doc: &NavDocument) -> Result<(), CompileError> {
        match compile_routes(doc, &self.config) {
            Ok(table) => {
                self.current.store(Arc::new(table));
                tracing::info!("Route table reloaded");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Route reload rejected, keeping current table");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::loader::NavFormat;

    #[test]
    fn test_reload_swaps_and_rejects() {
        let live = LiveRoutes::from_document(&NavDocument::builtin(), RoutingConfig::default()).unwrap();
        let before = live.snapshot();
        assert_eq!(before.len(), 4);

        let doc = NavDocument::parse(
            r#"{"navMain": [{"title": "V", "url": "/auto/video"}, {"title": "X", "url": "/x"}]}"#,
            NavFormat::Json,
        )
        .unwrap();
        live.reload(&doc).unwrap();
        assert_eq!(live.snapshot().len(), 3);
        // Old snapshot is unaffected.
        assert_eq!(before.len(), 4);

        let bad = NavDocument::parse(r#"{"navMain": [{"title": "B", "url": "relative"}]}"#, NavFormat::Json)
            .unwrap();
        assert!(live.reload(&bad).is_err());
        assert_eq!(live.snapshot().len(), 3);
    }
}
