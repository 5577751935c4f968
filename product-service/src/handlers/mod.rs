pub mod health;
pub mod products;

pub use health::{database_diagnostics, health_check, hello, metrics_endpoint, readiness_check, root};
pub use products::{create_product, list_products, seed_products};
