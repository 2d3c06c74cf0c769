use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_port_3000_and_empty_runtime() {
    let config = HostConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.runtime, RuntimeConfig::default());
}

#[test]
fn reads_and_trims_platform_values() {
    let config = HostConfig::from_lookup(lookup(&[
        ("PORT", " 8080 "),
        ("ROSTER_BACKEND_URL", "https://db.example.test/ "),
        ("ROSTER_ANON_KEY", "anon"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.runtime.backend_url, "https://db.example.test");
    assert_eq!(config.runtime.anon_key, "anon");
    assert_eq!(config.runtime.site_url, "");
}

#[test]
fn rejects_invalid_port() {
    let err = HostConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(err.to_string().contains("eighty"));
}

#[test]
fn script_omits_unset_values() {
    let runtime = RuntimeConfig {
        backend_url: "https://db.example.test".to_owned(),
        ..RuntimeConfig::default()
    };
    assert_eq!(
        runtime.to_script(),
        "window.ROSTER_CONFIG = {\"backend_url\":\"https://db.example.test\"};\n"
    );
    assert_eq!(RuntimeConfig::default().to_script(), "window.ROSTER_CONFIG = {};\n");
}

#[test]
fn leptos_error_names_its_source() {
    let err = ConfigError::Leptos("missing [package.metadata.leptos]".to_owned());
    assert_eq!(err.to_string(), "leptos configuration: missing [package.metadata.leptos]");
}
