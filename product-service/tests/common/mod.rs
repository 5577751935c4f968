#![allow(dead_code)]

use product_service::config::{ProductConfig, StoreBackend, StoreConfig};
use product_service::services::{InMemoryProductStore, ProductCatalog, ProductStore};
use product_service::startup::{build_router, AppState, Application};
use service_core::config::{Config as CoreConfig, Environment};
use std::sync::Arc;

pub fn memory_config() -> ProductConfig {
    ProductConfig {
        common: CoreConfig {
            port: 0,
            environment: Environment::Dev,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            uri: None,
            database: "product_test".to_string(),
        },
    }
}

/// Router over a fresh in-memory store, for `oneshot` tests.
pub fn router_with_store(store: Option<Arc<dyn ProductStore>>) -> axum::Router {
    build_router(AppState {
        config: memory_config(),
        catalog: ProductCatalog::new(store),
    })
}

pub fn memory_router() -> (axum::Router, Arc<InMemoryProductStore>) {
    let store = Arc::new(InMemoryProductStore::new());
    let handle: Arc<dyn ProductStore> = store.clone();
    (router_with_store(Some(handle)), store)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub state: AppState,
}

impl TestApp {
    /// Boot the real server on a random port with an in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(memory_config()).await
    }

    pub async fn spawn_with(config: ProductConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let state = app.state().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling the root endpoint
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            state,
        }
    }
}
