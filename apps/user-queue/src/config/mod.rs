use std::env;

use crate::messaging::connection::{
    ConnectionError, ConnectorConfig, DEFAULT_SERVICE_NAME, SERVICE_BINDINGS_VAR,
};

pub mod service_binding;

pub const DEFAULT_QUEUE_NAME: &str = "users";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub connector: ConnectorConfig,
    pub service_name: String,
    pub queue_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let service_name = lookup("RABBITMQ_SERVICE_NAME")
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let connector =
            ConnectorConfig::resolve(lookup(SERVICE_BINDINGS_VAR).as_deref(), &service_name)?;

        let queue_name =
            lookup("QUEUE_NAME").unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            connector,
            service_name,
            queue_name,
            port,
            rust_log,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Broker(#[from] ConnectionError),
}
