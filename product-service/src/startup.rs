//! Application startup and lifecycle management.

use crate::config::{ProductConfig, StoreBackend, StoreConfig};
use crate::handlers;
use crate::services::{InMemoryProductStore, MongoDb, ProductCatalog, ProductStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ProductConfig,
    pub catalog: ProductCatalog,
}

/// Open the configured store. A Mongo backend without a URI yields no
/// store at all rather than an error.
pub async fn connect_store(
    config: &StoreConfig,
) -> Result<Option<Arc<dyn ProductStore>>, AppError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory product store");
            let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
            Ok(Some(store))
        }
        StoreBackend::Mongo => match &config.uri {
            Some(uri) => {
                let db = MongoDb::connect(uri, &config.database).await?;
                db.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                let store: Arc<dyn ProductStore> = Arc::new(db);
                Ok(Some(store))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, product endpoints will report the database as unavailable");
                Ok(None)
            }
        },
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::database_diagnostics))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/api/products/seed", post(handlers::seed_products))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ProductConfig) -> Result<Self, AppError> {
        let store = connect_store(&config.store).await.map_err(|e| {
            tracing::error!("Failed to open product store: {}", e);
            e
        })?;

        let state = AppState {
            config: config.clone(),
            catalog: ProductCatalog::new(store),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state.clone()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
