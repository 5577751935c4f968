use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

const SERVICE_NAME: &str = "product-service";

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Hello from the product-service backend!" }))
}

pub async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello from the backend API!" }))
}

/// Liveness: the process is up and the store answers a ping.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let result = match state.catalog.store() {
        Some(store) => store.ping().await.map_err(|e| e.to_string()),
        None => Err("database not configured".to_string()),
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "error": error
            })),
        ),
    }
}

pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(store) = state.catalog.store() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match store.ping().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

#[derive(Debug, Serialize)]
pub struct DatabaseDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// Human-readable connectivity report. Always 200: failures end up in
/// the `database` text.
pub async fn database_diagnostics(State(state): State<AppState>) -> Json<DatabaseDiagnostics> {
    let mut report = DatabaseDiagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: if state.config.store.uri.is_some() {
            "✅ Set".to_string()
        } else {
            "❌ Not Set".to_string()
        },
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Some(store) = state.catalog.store() {
        report.database = "✅ Available".to_string();
        report.database_name = Some(store.database_name().to_string());
        report.connection_status = "Connected".to_string();

        match store.collection_names().await {
            Ok(names) => {
                report.collections = names.into_iter().take(MAX_LISTED_COLLECTIONS).collect();
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!("Database diagnostics failed: {}", e);
                let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
                report.database = format!("⚠️  Connected but Error: {}", message);
            }
        }
    }

    Json(report)
}
