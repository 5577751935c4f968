pub mod catalog;
pub mod database;
pub mod metrics;
pub mod store;

pub use catalog::{CatalogError, ProductCatalog, DEFAULT_LIST_LIMIT};
pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics};
pub use store::{InMemoryProductStore, ProductFilter, ProductStore};
