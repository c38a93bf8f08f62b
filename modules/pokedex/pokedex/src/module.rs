//! Composition root: wires storage, service, REST routes and the local client.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use pokedex_sdk::PokedexClientV1;
use tracing::{debug, info, warn};

use crate::api::rest::routes;
use crate::config::{CorsConfig, PokedexConfig};
use crate::domain::repo::PokemonRepository;
use crate::domain::service::Service;
use crate::infra::seed::load_seed_file;
use crate::infra::storage::{InMemoryPokemonRepository, SeaOrmPokemonRepository, Storage};
use crate::local_client::PokedexLocalClient;

/// HTTP-level settings the module router needs.
#[derive(Debug, Clone, Default)]
pub struct RestSettings {
    pub cors: CorsConfig,
    /// Directory served under `/assets`; no static route when `None`.
    pub assets_dir: Option<PathBuf>,
}

/// The pokedex module: one service instance plus the storage it owns.
pub struct Pokedex {
    service: Arc<Service>,
    storage: Option<Storage>,
}

impl Pokedex {
    /// Build the module over a migrated database.
    ///
    /// # Errors
    /// Returns an error if connecting, migrating or seeding fails.
    pub async fn connect(dsn: &str, cfg: &PokedexConfig) -> anyhow::Result<Self> {
        info!("Initializing pokedex module with database storage");
        let storage = Storage::connect(dsn).await?;
        storage.migrate().await?;

        let repo: Arc<dyn PokemonRepository> =
            Arc::new(SeaOrmPokemonRepository::new(storage.conn().clone()));
        let module = Self::assemble(repo, cfg, Some(storage));
        module.seed(cfg).await?;
        Ok(module)
    }

    /// Build the module over the process-local repository.
    ///
    /// # Errors
    /// Returns an error if the seed file cannot be loaded.
    pub async fn in_memory(cfg: &PokedexConfig) -> anyhow::Result<Self> {
        warn!("No database configured, pokedex data lives in memory and is lost on exit");
        let module = Self::assemble(Arc::new(InMemoryPokemonRepository::new()), cfg, None);
        module.seed(cfg).await?;
        Ok(module)
    }

    /// Build the module over any repository implementation.
    #[must_use]
    pub fn with_repository(repo: Arc<dyn PokemonRepository>, cfg: &PokedexConfig) -> Self {
        Self::assemble(repo, cfg, None)
    }

    fn assemble(
        repo: Arc<dyn PokemonRepository>,
        cfg: &PokedexConfig,
        storage: Option<Storage>,
    ) -> Self {
        let service_config = cfg.service_config();
        debug!(
            "Loaded pokedex config: default_page_size={}, max_page_size={}",
            service_config.limits.default, service_config.limits.max
        );
        Self {
            service: Arc::new(Service::new(repo, service_config)),
            storage,
        }
    }

    async fn seed(&self, cfg: &PokedexConfig) -> anyhow::Result<()> {
        let Some(path) = &cfg.seed_file else {
            return Ok(());
        };
        let records = load_seed_file(path, self.service.config()).await?;
        let written = self.service.seed(records).await?;
        info!(written, file = %path.display(), "Pokedex seed processed");
        Ok(())
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Transport-agnostic client for in-process consumers.
    #[must_use]
    pub fn client(&self) -> Arc<dyn PokedexClientV1> {
        Arc::new(PokedexLocalClient::new(self.service()))
    }

    /// Full HTTP surface: collection routes, static assets, CORS and request
    /// tracing.
    #[must_use]
    pub fn router(&self, settings: &RestSettings) -> Router {
        info!("Registering pokedex REST routes");
        let mut router = routes::register_routes(Router::new(), self.service());
        if let Some(dir) = &settings.assets_dir {
            router = routes::register_assets(router, dir);
        }
        let router = router.layer(routes::build_cors_layer(&settings.cors));
        routes::apply_trace_layer(router)
    }

    /// Release the database handle, if any.
    ///
    /// # Errors
    /// Returns an error if the pool fails to close.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        if let Some(storage) = self.storage {
            storage.close().await?;
            info!("Pokedex database connection closed");
        }
        Ok(())
    }
}
