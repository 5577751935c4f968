use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// MongoDB connection string. Unset means the service runs without a
    /// database and reports it as unavailable.
    pub uri: Option<String>,
    pub database: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl ProductConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let environment = common_config.environment;

        let backend: StoreBackend = environment
            .var("STORE_BACKEND", Some("mongo"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let uri = match backend {
            StoreBackend::Mongo => environment.optional_var("DATABASE_URL")?,
            StoreBackend::Memory => None,
        };

        Ok(ProductConfig {
            common: common_config,
            store: StoreConfig {
                backend,
                uri,
                database: environment.var("DATABASE_NAME", Some("product_db"))?,
            },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}
