//! Cloud Foundry style service bindings, as injected through `VCAP_SERVICES`.
//!
//! The document maps a service label to the list of bound instances:
//!
//! ```json
//! { "rabbitmq": [ { "name": "stackato-rabbitmq", "credentials": { "uri": "amqp://..." } } ] }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInstance {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub credentials: Map<String, Value>,
}

impl ServiceInstance {
    /// Returns the credential under `key` when it is present and a JSON string.
    pub fn credential_string(&self, key: &str) -> Option<&str> {
        self.credentials.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceBindings {
    services: HashMap<String, Vec<ServiceInstance>>,
}

impl ServiceBindings {
    pub fn parse(raw: &str) -> Result<Self, BindingError> {
        let services = serde_json::from_str(raw)
            .map_err(|e| BindingError::InvalidDocument(e.to_string()))?;
        Ok(Self { services })
    }

    pub fn with_name(&self, name: &str) -> Result<&ServiceInstance, BindingError> {
        self.services
            .values()
            .flatten()
            .find(|instance| instance.name == name)
            .ok_or_else(|| BindingError::ServiceNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.services.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Failed to parse the service bindings document: {0}")]
    InvalidDocument(String),

    #[error("No bound service named {0}")]
    ServiceNotFound(String),

    #[error("Service {service} has no string credential {key}")]
    MissingCredential { service: String, key: String },
}
