//! Server runtime
//!
//! [`ServerHandle`] owns the full lifecycle: database, migrations, admin
//! bootstrap, cache, services, the HTTP listener and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{
    BookingService, CatalogService, IdentityService, RegisterUser, ResponseCache,
};
use crate::config::AppConfig;
use crate::domain::{CacheStore, DomainResult, RepositoryProvider, UserRole};
use crate::infrastructure::{connect_cache, init_database, run_migrations, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiDependencies};
use crate::shared::shutdown::{listen_for_shutdown_signals, shutdown_with_timeout, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin when no users exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── Services ───────────────────────────────────────────────────────

/// Application services wired from one config, database and cache.
#[derive(Clone)]
pub struct Services {
    pub repos: Arc<dyn RepositoryProvider>,
    pub identity: Arc<IdentityService>,
    pub catalog: Arc<CatalogService>,
    pub bookings: Arc<BookingService>,
}

impl Services {
    pub fn new(config: &AppConfig, db: DatabaseConnection, cache: Arc<dyn CacheStore>) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        let response_cache = ResponseCache::new(cache, config.cache_keys(), config.cache_ttls());

        Self {
            identity: Arc::new(IdentityService::new(
                repos.clone(),
                config.jwt_config(),
                config.security.bcrypt_cost,
            )),
            catalog: Arc::new(CatalogService::new(repos.clone(), response_cache.clone())),
            bookings: Arc::new(BookingService::new(repos.clone(), response_cache)),
            repos,
        }
    }

    pub fn api_dependencies(
        &self,
        db: DatabaseConnection,
        cache: Arc<dyn CacheStore>,
        metrics: PrometheusHandle,
    ) -> ApiDependencies {
        ApiDependencies {
            identity: self.identity.clone(),
            catalog: self.catalog.clone(),
            bookings: self.bookings.clone(),
            db,
            cache,
            metrics,
        }
    }
}

/// The global recorder can only be installed once per process; later calls
/// reuse the first handle.
pub fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!(error = %e, "Could not install metrics recorder, /metrics will be empty");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// ```rust,no_run
/// use hotel_reservation::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub services: Services,
    pub config: AppConfig,
    /// Bound address (useful with port 0).
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting hotel reservation service...");

        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;
        if opts.auto_migrate {
            info!("Running database migrations...");
            run_migrations(&db).await?;
            info!("Migrations completed");
        }

        // ── Cache & services ───────────────────────────────────
        let cache = connect_cache(app_cfg.cache.redis_url.as_deref()).await;
        let services = Services::new(&app_cfg, db.clone(), cache.clone());
        info!(
            "JWT configured with {}h token expiration",
            app_cfg.security.jwt_expiration_hours
        );

        if opts.create_default_admin {
            if let Err(e) = create_default_admin(&services.identity, &app_cfg).await {
                error!("Failed to create admin user: {}", e);
            }
        }

        // ── HTTP ───────────────────────────────────────────────
        let router = create_api_router(services.api_dependencies(db.clone(), cache, prometheus));

        let listener = tokio::net::TcpListener::bind(app_cfg.listen_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started");
        Ok(Self {
            services,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for in-flight requests (bounded by `server.shutdown_timeout`),
    /// then close the database.
    pub async fn wait(self) {
        let timeout = self.config.shutdown_timeout();
        let api_task = self.api_task;
        let drained = shutdown_with_timeout(timeout, async move {
            if let Err(e) = api_task.await {
                error!("REST API server task panicked: {}", e);
            }
        })
        .await;
        if !drained {
            warn!("⚠️ Some requests were still running at shutdown");
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }
        info!("👋 Shutdown complete");
    }

    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured administrator if the user table is empty.
/// Returns whether an account was created.
pub async fn create_default_admin(identity: &IdentityService, app_cfg: &AppConfig) -> DomainResult<bool> {
    if identity.user_count().await? > 0 {
        return Ok(false);
    }

    info!("Creating default admin user...");
    let admin = &app_cfg.admin;
    let user = identity
        .create_user(
            RegisterUser {
                first_name: admin.first_name.clone(),
                last_name: admin.last_name.clone(),
                email: admin.email.clone(),
                password: admin.password.clone(),
            },
            UserRole::Admin,
        )
        .await?;

    info!("Default admin created: {}", user.email);
    info!("⚠️  Please change the admin password immediately!");
    Ok(true)
}

/// Install the global tracing subscriber. `RUST_LOG` wins over
/// `logging.level`; `logging.format = "json"` switches to JSON lines.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_connection;
    use crate::infrastructure::MemoryCacheStore;

    fn test_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.security.bcrypt_cost = 4;
        cfg
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let cfg = test_config();
        let services = Services::new(&cfg, test_connection().await, Arc::new(MemoryCacheStore::new()));

        assert!(create_default_admin(&services.identity, &cfg).await.unwrap());
        assert!(!create_default_admin(&services.identity, &cfg).await.unwrap());

        let auth = services
            .identity
            .login(&cfg.admin.email, &cfg.admin.password)
            .await
            .unwrap();
        assert!(auth.user.is_admin());
    }

    #[tokio::test]
    async fn start_and_shutdown_on_ephemeral_port() {
        let mut cfg = test_config();
        cfg.database.url = "sqlite::memory:".to_string();
        cfg.database.max_connections = 1;
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        cfg.server.shutdown_timeout = 5;

        let handle = ServerHandle::start(ServerOptions {
            config: cfg,
            auto_migrate: true,
            create_default_admin: true,
        })
        .await
        .unwrap();
        assert_ne!(handle.local_addr.port(), 0);
        assert!(handle.is_running());
        assert_eq!(handle.services.identity.user_count().await.unwrap(), 1);

        handle.shutdown().await;
    }
}
