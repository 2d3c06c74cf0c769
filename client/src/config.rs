//! Build-time platform configuration with an optional runtime override.
//!
//! Values come from `option_env!` at compile time and may be replaced at
//! runtime by `window.ROSTER_CONFIG`, which the host serves from
//! `/runtime-config.js`. Everything here is public; the anon key is a
//! publishable key, row access is enforced by the platform.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Hosted platform endpoints and keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hosted auth/data/storage platform.
    pub backend_url: String,
    /// Publishable project key sent as the `apikey` header.
    pub anon_key: String,
    /// Public origin used for email redirect links; empty means the current origin.
    pub site_url: String,
}

impl AppConfig {
    /// Load build-time values and apply runtime overrides.
    pub fn load() -> Self {
        let mut config = Self {
            backend_url: option_env!("ROSTER_BACKEND_URL").unwrap_or("").to_owned(),
            anon_key: option_env!("ROSTER_ANON_KEY").unwrap_or("").to_owned(),
            site_url: option_env!("ROSTER_SITE_URL").unwrap_or("").to_owned(),
        };
        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }
        config.backend_url = config.backend_url.trim_end_matches('/').to_owned();
        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_url.is_empty() && !self.anon_key.is_empty()
    }

    /// Origin for redirect links: the configured site URL or the page origin.
    pub fn redirect_origin(&self) -> String {
        let site = self.site_url.trim().trim_end_matches('/');
        if !site.is_empty() {
            return site.to_owned();
        }
        current_origin()
    }
}

#[derive(Default)]
struct RuntimeConfig {
    backend_url: Option<String>,
    anon_key: Option<String>,
    site_url: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.backend_url {
        config.backend_url = value;
    }
    if let Some(value) = runtime.anon_key {
        config.anon_key = value;
    }
    if let Some(value) = runtime.site_url {
        config.site_url = value;
    }
}

#[cfg(feature = "hydrate")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("ROSTER_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        backend_url: read_runtime_value(&object, "backend_url"),
        anon_key: read_runtime_value(&object, "anon_key"),
        site_url: read_runtime_value(&object, "site_url"),
    })
}

#[cfg(not(feature = "hydrate"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(feature = "hydrate")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn current_origin() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
