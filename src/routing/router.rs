//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Validate collected descriptors into route records
//! - Append the root redirect to the default route
//! - Resolve a path, following redirects
//!
//! # Design Decisions
//! - Immutable after construction; reloads build a new table
//! - Validation reports every error, not just the first
//! - Duplicate paths: first registration wins
//! - Redirect chains are bounded by `MAX_REDIRECTS`

use std::collections::HashMap;

use serde::Serialize;

use crate::routing::collector::RouteDescriptor;
use crate::routing::route::{RouteError, RouteRecord};

/// Maximum redirect hops followed by `resolve`.
pub const MAX_REDIRECTS: usize = 8;

/// The application's navigable routes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteTable {
    /// Routes in registration order.
    routes: Vec<RouteRecord>,

    #[serde(skip)]
    by_path: HashMap<String, usize>,
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub requested: String,
    pub route: RouteRecord,
    /// Paths passed through on the way, in order.
    pub redirected_from: Vec<String>,
}

impl RouteTable {
    /// Build a table from collected descriptors plus an optional root redirect.
    pub fn build(
        descriptors: &[RouteDescriptor],
        default_redirect: Option<&str>,
    ) -> Result<Self, Vec<RouteError>> {
        let mut records = Vec::with_capacity(descriptors.len() + 1);
        let mut errors = Vec::new();

        for descriptor in descriptors {
            match RouteRecord::try_from(descriptor) {
                Ok(record) => records.push(record),
                Err(e) => errors.push(e),
            }
        }
        if let Some(target) = default_redirect {
            records.push(RouteRecord::redirect("/", target));
        }

        let mut table = RouteTable::default();
        for record in records {
            table.insert(record);
        }

        for route in &table.routes {
            if let Some(to) = &route.redirect {
                if !table.by_path.contains_key(normalize(to)) {
                    errors.push(RouteError::UnknownRedirect {
                        from: route.path.clone(),
                        to: to.clone(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(table)
        } else {
            Err(errors)
        }
    }

    fn insert(&mut self, record: RouteRecord) {
        let key = normalize(&record.path).to_string();
        if self.by_path.contains_key(&key) {
            tracing::warn!(path = %record.path, "Duplicate route ignored");
            return;
        }
        self.by_path.insert(key, self.routes.len());
        self.routes.push(record);
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Exact lookup without following redirects.
    pub fn get(&self, path: &str) -> Option<&RouteRecord> {
        self.by_path.get(normalize(path)).map(|&i| &self.routes[i])
    }

    /// Look up `path` and follow redirects to the final route.
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        let mut current = self
            .get(path)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        let mut redirected_from = Vec::new();

        while let Some(target) = &current.redirect {
            if redirected_from.len() >= MAX_REDIRECTS
                || redirected_from.iter().any(|p| p == &current.path)
            {
                return Err(RouteError::RedirectLoop(path.to_string()));
            }
            redirected_from.push(current.path.clone());
            current = self
                .get(target)
                .ok_or_else(|| RouteError::NotFound(target.clone()))?;
        }

        Ok(Resolution {
            requested: path.to_string(),
            route: current.clone(),
            redirected_from,
        })
    }
}

/// Strip query, fragment and trailing slashes (the root stays `/`).
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
