//! Host configuration from the environment.
//!
//! The platform URL and key are handed to the browser through
//! `/runtime-config.js`, so one build can be pointed at different projects.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    Port {
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

/// Values the browser reads from `window.ROSTER_CONFIG`. Empty means unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub backend_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub anon_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub site_url: String,
}

impl RuntimeConfig {
    /// Script body assigning the config object.
    pub fn to_script(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned());
        format!("window.ROSTER_CONFIG = {json};\n")
    }
}

#[derive(Clone, Debug)]
pub struct HostConfig {
    pub port: u16,
    pub runtime: RuntimeConfig,
}

impl HostConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Port` if `PORT` is set but not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::Port { value, source })?,
            None => 3000,
        };
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).unwrap_or_default();
        Ok(Self {
            port,
            runtime: RuntimeConfig {
                backend_url: read("ROSTER_BACKEND_URL").trim_end_matches('/').to_owned(),
                anon_key: read("ROSTER_ANON_KEY"),
                site_url: read("ROSTER_SITE_URL"),
            },
        })
    }
}
