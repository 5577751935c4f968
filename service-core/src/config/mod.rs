use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

fn default_port() -> u16 {
    8080
}

/// Deployment environment. Production makes every service-specific
/// variable mandatory, defaults only apply in development.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn is_prod(self) -> bool {
        self == Environment::Prod
    }

    /// Read `key` from the process environment, falling back to `default`
    /// outside production.
    pub fn var(self, key: &str, default: Option<&str>) -> Result<String, AppError> {
        match env::var(key) {
            Ok(val) => Ok(val),
            Err(_) => {
                if self.is_prod() {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required in production but not set",
                        key
                    )))
                } else if let Some(def) = default {
                    Ok(def.to_string())
                } else {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required but not set",
                        key
                    )))
                }
            }
        }
    }

    /// Like [`Environment::var`] but an unset variable is `None` in
    /// development instead of an error.
    pub fn optional_var(self, key: &str) -> Result<Option<String>, AppError> {
        match env::var(key) {
            Ok(val) if !val.is_empty() => Ok(Some(val)),
            _ if self.is_prod() => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required in production but not set",
                key
            ))),
            _ => Ok(None),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("environment", env::var("ENVIRONMENT").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
