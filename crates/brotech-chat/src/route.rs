//! Current page route, read when a greeting is chosen.

use std::sync::{Arc, PoisonError, RwLock};

/// Exposes the path of the page the widget is mounted on.
pub trait RouteObserver: Send + Sync {
    fn current_path(&self) -> String;
}

/// A settable route shared between the front end and the engine.
#[derive(Debug, Clone, Default)]
pub struct CurrentRoute {
    path: Arc<RwLock<String>>,
}

impl CurrentRoute {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Arc::new(RwLock::new(path.into())),
        }
    }

    /// Navigate to `path`.
    pub fn set(&self, path: impl Into<String>) {
        *self.path.write().unwrap_or_else(PoisonError::into_inner) = path.into();
    }
}

impl RouteObserver for CurrentRoute {
    fn current_path(&self) -> String {
        self.path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
