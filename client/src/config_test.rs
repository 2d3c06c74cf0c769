use super::*;

fn config() -> AppConfig {
    AppConfig {
        backend_url: "https://db.default".to_owned(),
        anon_key: "anon-default".to_owned(),
        site_url: String::new(),
    }
}

#[test]
fn normalize_runtime_value_trims_and_rejects_empty() {
    assert_eq!(normalize_runtime_value(""), None);
    assert_eq!(normalize_runtime_value("   "), None);
    assert_eq!(
        normalize_runtime_value("  https://db.example.test "),
        Some("https://db.example.test".to_owned())
    );
}

#[test]
fn runtime_overrides_only_replace_present_values() {
    let mut config = config();
    let runtime = RuntimeConfig {
        backend_url: normalize_runtime_value("https://db.override"),
        anon_key: normalize_runtime_value("  "),
        site_url: None,
    };
    apply_runtime_overrides(&mut config, runtime);
    assert_eq!(config.backend_url, "https://db.override");
    assert_eq!(config.anon_key, "anon-default");
    assert_eq!(config.site_url, "");
}

#[test]
fn is_configured_requires_url_and_key() {
    assert!(config().is_configured());
    let mut missing = config();
    missing.anon_key.clear();
    assert!(!missing.is_configured());
}

#[test]
fn redirect_origin_prefers_site_url_without_trailing_slash() {
    let mut config = config();
    config.site_url = "https://dojo.example.test/".to_owned();
    assert_eq!(config.redirect_origin(), "https://dojo.example.test");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn redirect_origin_is_empty_without_site_url_outside_the_browser() {
    assert_eq!(config().redirect_origin(), "");
}
