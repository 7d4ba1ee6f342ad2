//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Catalog Versioning
//!
//! The active pack-size catalog is an immutable [`Catalog`] behind an `Arc`.
//! Handlers take a [`CatalogStore::snapshot`] (an `Arc` clone under a brief
//! read lock) and hand it to the solver. `POST /packages` installs a
//! replacement with [`CatalogStore::replace`]; optimizations already in
//! flight keep solving against the snapshot they took.
//!
//! The lock is `parking_lot`, never held across an `.await`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use packopt_core::PackSizeSet;
use parking_lot::RwLock;

use crate::config::AppConfig;
use crate::middleware::metrics::ApiMetrics;

/// One version of the pack-size catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// The pack sizes, in the order they were configured.
    pub pack_sizes: PackSizeSet,
    /// Starts at 1 and increases by one per replacement.
    pub version: u64,
    /// When this version was installed.
    pub updated_at: DateTime<Utc>,
}

/// Thread-safe, cloneable holder of the active [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogStore {
    active: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogStore {
    /// Create a store whose first version holds `pack_sizes`.
    pub fn new(pack_sizes: PackSizeSet) -> Self {
        Self {
            active: Arc::new(RwLock::new(Arc::new(Catalog {
                pack_sizes,
                version: 1,
                updated_at: Utc::now(),
            }))),
        }
    }

    /// The catalog currently in effect.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.active.read())
    }

    /// Non-blocking variant of [`snapshot`](Self::snapshot), `None` while a
    /// replacement holds the write lock.
    pub fn try_snapshot(&self) -> Option<Arc<Catalog>> {
        self.active.try_read().map(|guard| Arc::clone(&guard))
    }

    /// Install `pack_sizes` as the next version and return it.
    pub fn replace(&self, pack_sizes: PackSizeSet) -> Arc<Catalog> {
        let mut guard = self.active.write();
        let next = Arc::new(Catalog {
            pack_sizes,
            version: guard.version + 1,
            updated_at: Utc::now(),
        });
        *guard = Arc::clone(&next);
        next
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Startup configuration.
    pub config: Arc<AppConfig>,
    /// Active pack-size catalog.
    pub catalog: CatalogStore,
    /// Prometheus registry and collectors.
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Build state from configuration, installing `config.pack_sizes` as
    /// catalog version 1.
    pub fn try_new(config: AppConfig) -> Result<Self, prometheus::Error> {
        let metrics = ApiMetrics::try_new()?;
        let catalog = CatalogStore::new(config.pack_sizes.clone());
        Ok(Self {
            config: Arc::new(config),
            catalog,
            metrics,
        })
    }
}
