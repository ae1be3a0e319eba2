//! Shared application context.
//!
//! [`AppContext`] is handed to every route handler via Axum state. It only
//! holds `Arc`s, so cloning it per request is cheap.

use std::sync::Arc;

use ph_catalog::{CatalogService, CatalogSource, OphimClient};
use ph_core::config::Config;

use crate::middleware::rate_limit::{create_limiter, SharedLimiter};

#[derive(Clone)]
pub struct AppContext {
    /// Immutable configuration snapshot.
    pub config: Arc<Config>,
    /// Catalog operations backing the `/api/movies` routes.
    pub catalog: Arc<CatalogService>,
    /// Request budget for `/api`; `None` when rate limiting is off.
    pub limiter: Option<SharedLimiter>,
}

impl AppContext {
    /// Build a context around an arbitrary catalog source.
    pub fn with_source(config: Config, source: Arc<dyn CatalogSource>) -> Self {
        let catalog = Arc::new(CatalogService::new(source, config.images.clone()));
        let limiter = create_limiter(config.server.requests_per_minute);
        Self {
            config: Arc::new(config),
            catalog,
            limiter,
        }
    }

    /// Build the production context backed by the OPhim API.
    pub fn from_config(config: Config) -> ph_core::Result<Self> {
        let client = OphimClient::new(&config.upstream)?;
        tracing::info!("Catalog source {} at {}", client.name(), client.base_url());
        Ok(Self::with_source(config, Arc::new(client)))
    }
}
